//! The indented syntax front end.

use crate::check::check_files;
use sass_compile::Options;

#[test]
fn basic_rule() {
  check_files(
    &[("/main.sass", "a\n  color: red\n")],
    "/main.sass",
    "a {\n  color: red;\n}\n",
  );
}

#[test]
fn sibling_rules() {
  check_files(
    &[("/main.sass", "a\n  color: red\nb\n  top: 0\n")],
    "/main.sass",
    "a {\n  color: red;\n}\n\nb {\n  top: 0;\n}\n",
  );
}

#[test]
fn nested_rules() {
  check_files(
    &[("/main.sass", ".a\n  color: red\n  .b\n    top: 0\n")],
    "/main.sass",
    ".a {\n  color: red;\n}\n\n.a .b {\n  top: 0;\n}\n",
  );
}

#[test]
fn variables_and_mixins() {
  let src = "$c: red\n@mixin m\n  color: $c\na\n  @include m\n";
  check_files(&[("/main.sass", src)], "/main.sass", "a {\n  color: red;\n}\n");
}

#[test]
fn control_flow() {
  let src = "@for $i from 1 through 2\n  .m-#{$i}\n    w: #{$i}px\n";
  check_files(
    &[("/main.sass", src)],
    "/main.sass",
    ".m-1 {\n  w: 1px;\n}\n\n.m-2 {\n  w: 2px;\n}\n",
  );
}

#[test]
fn blank_lines_ignored() {
  check_files(
    &[("/main.sass", "a\n\n  color: red\n\n\nb\n  top: 0\n")],
    "/main.sass",
    "a {\n  color: red;\n}\n\nb {\n  top: 0;\n}\n",
  );
}

#[test]
fn inline_text_indented_flag() {
  let fs = crate::check::mem_fs(&[]);
  let input = sass_compile::Input::Text {
    text: "a\n  color: red\n".to_owned(),
    path: Some(std::path::PathBuf::from("/inline.sass")),
  };
  let opts = Options { indented_syntax: true, ..Options::default() };
  let result =
    sass_compile::compile_with(&fs, input, opts, &mut |_| sass_compile::ImportAnswer::UseDefault)
      .expect("should compile");
  assert_eq!("a {\n  color: red;\n}\n", result.css);
}
