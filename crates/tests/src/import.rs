//! Import resolution: partials, memoization, cycles, plain-CSS passthrough.

use crate::check::{check, check_files, check_files_err, compile_files};
use sass_compile::Options;

#[test]
fn partial_resolution() {
  check_files(
    &[
      ("/main.scss", "@import \"other\";\na { color: $c; }"),
      ("/_other.scss", "$c: red;"),
    ],
    "/main.scss",
    "a {\n  color: red;\n}\n",
  );
}

#[test]
fn import_emits_rules_in_place() {
  check_files(
    &[
      ("/main.scss", "@import \"base\";\na { x: y; }"),
      ("/base.scss", "b { c: d; }"),
    ],
    "/main.scss",
    "b {\n  c: d;\n}\n\na {\n  x: y;\n}\n",
  );
}

#[test]
fn import_once() {
  check_files(
    &[
      ("/main.scss", "@import \"base\";\n@import \"base\";"),
      ("/base.scss", "b { c: d; }"),
    ],
    "/main.scss",
    "b {\n  c: d;\n}\n",
  );
}

#[test]
fn transitive_imports() {
  check_files(
    &[
      ("/main.scss", "@import \"mid\";\na { w: $w; }"),
      ("/_mid.scss", "@import \"leaf\";"),
      ("/_leaf.scss", "$w: 9px;"),
    ],
    "/main.scss",
    "a {\n  w: 9px;\n}\n",
  );
}

#[test]
fn multiple_imports_in_one_directive() {
  check_files(
    &[
      ("/main.scss", "@import \"a\", \"b\";"),
      ("/_a.scss", "a { x: 1; }"),
      ("/_b.scss", "b { y: 2; }"),
    ],
    "/main.scss",
    "a {\n  x: 1;\n}\n\nb {\n  y: 2;\n}\n",
  );
}

#[test]
fn cycle_fails_and_never_hangs() {
  check_files_err(
    &[
      ("/a.scss", "@import \"b\";"),
      ("/b.scss", "@import \"a\";"),
    ],
    "/a.scss",
    "import cycle",
  );
}

#[test]
fn self_import_is_a_cycle() {
  check_files_err(&[("/a.scss", "@import \"a\";")], "/a.scss", "import cycle");
}

#[test]
fn not_found() {
  check_files_err(
    &[("/main.scss", "@import \"missing\";")],
    "/main.scss",
    "file to import not found",
  );
}

#[test]
fn plain_css_import_passes_through() {
  check("@import \"foo.css\";", "@import \"foo.css\";\n");
  check("@import url(foo);", "@import url(foo);\n");
  check("@import \"http://example.com/x\";", "@import \"http://example.com/x\";\n");
}

#[test]
fn media_queried_import_passes_through() {
  check("@import \"foo.css\" screen;", "@import \"foo.css\" screen;\n");
}

#[test]
fn included_files_in_load_order() {
  let result = compile_files(
    &[
      ("/main.scss", "@import \"one\";\n@import \"two\";"),
      ("/_one.scss", "a { x: 1; }"),
      ("/_two.scss", "b { y: 2; }"),
    ],
    "/main.scss",
    Options::default(),
  )
  .expect("should compile");
  let names: Vec<String> = result
    .included_files
    .iter()
    .map(|p| p.file_name().expect("file name").to_string_lossy().into_owned())
    .collect();
  assert_eq!(vec!["main.scss", "_one.scss", "_two.scss"], names);
}

#[test]
fn imported_indented_file() {
  check_files(
    &[
      ("/main.scss", "@import \"sub\";"),
      ("/_sub.sass", "a\n  color: red\n"),
    ],
    "/main.scss",
    "a {\n  color: red;\n}\n",
  );
}

#[test]
fn import_inside_rule_scopes_rules() {
  check_files(
    &[
      ("/main.scss", ".wrap { @import \"inner\"; }"),
      ("/_inner.scss", ".x { a: b; }"),
    ],
    "/main.scss",
    ".wrap .x {\n  a: b;\n}\n",
  );
}
