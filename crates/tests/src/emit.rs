//! Output styles and emission details.

use crate::check::{check, check_opts, compile_files};
use sass_compile::{Options, Style};

fn compressed() -> Options {
  Options { style: Style::Compressed, ..Options::default() }
}

#[test]
fn compressed_style() {
  check_opts(
    "a { color: red; top: 0; } b { left: 1px; }",
    compressed(),
    "a{color:red;top:0}b{left:1px}\n",
  );
}

#[test]
fn compressed_media() {
  check_opts(
    "@media screen { a { color: red; } }",
    compressed(),
    "@media screen{a{color:red}}\n",
  );
}

#[test]
fn compressed_minifies_colors_and_numbers() {
  check_opts(
    "a { c: #aabbcc; w: 0.5px; }",
    compressed(),
    "a{c:#abc;w:.5px}\n",
  );
}

#[test]
fn loud_comment_preserved() {
  check(
    "/*! keep me */\na { b: c; }",
    "/*! keep me */\n\na {\n  b: c;\n}\n",
  );
}

#[test]
fn silent_comment_dropped() {
  check("// gone\na { /* also gone */ b: c; }", "a {\n  b: c;\n}\n");
}

#[test]
fn precision_option() {
  check_opts(
    "a { w: 1 / 3; }",
    Options { precision: 2, ..Options::default() },
    "a {\n  w: 0.33;\n}\n",
  );
}

#[test]
fn source_comments_option() {
  let files = [("/main.scss", "a { color: red; }\nb { top: 0; }")];
  let opts = Options { source_comments: true, ..Options::default() };
  let css = compile_files(&files, "/main.scss", opts).expect("should compile").css;
  assert!(css.contains("/* line 1, "), "missing line 1 comment: {css}");
  assert!(css.contains("/* line 2, "), "missing line 2 comment: {css}");
  assert!(css.contains("main.scss"), "missing file name: {css}");
}

#[test]
fn source_map_envelope() {
  let files = [("/main.scss", "a { color: red; }")];
  let opts = Options {
    source_map: Some(std::path::PathBuf::from("out.css.map")),
    source_map_contents: true,
    ..Options::default()
  };
  let result = compile_files(&files, "/main.scss", opts).expect("should compile");
  let map = result.source_map.expect("should have a source map");
  assert!(map.contains("\"version\":3"), "bad map: {map}");
  assert!(map.contains("main.scss"), "bad map: {map}");
  assert!(map.contains("color: red"), "map should embed source contents: {map}");
  assert!(result.css.contains("sourceMappingURL=out.css.map"), "bad css: {}", result.css);
}

#[test]
fn omit_source_map_url() {
  let files = [("/main.scss", "a { color: red; }")];
  let opts = Options {
    source_map: Some(std::path::PathBuf::from("out.css.map")),
    omit_source_map_url: true,
    ..Options::default()
  };
  let result = compile_files(&files, "/main.scss", opts).expect("should compile");
  assert!(result.source_map.is_some());
  assert!(!result.css.contains("sourceMappingURL"), "bad css: {}", result.css);
}
