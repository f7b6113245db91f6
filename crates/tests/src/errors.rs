//! The structured error surface: classes, locations, JSON.

use crate::check::{check_err, try_compile};

#[test]
fn undefined_variable() {
  check_err("a { w: $nope; }", "undefined variable: `nope`");
}

#[test]
fn undefined_variable_location_and_status() {
  let e = try_compile("a { b: c; }\nd { w: $nope; }").expect_err("expected an error");
  assert_eq!(2, e.status.code());
  assert_eq!(Some(2), e.line);
  assert!(e.path.is_some(), "error should carry a path");
}

#[test]
fn parse_error_is_syntax_status() {
  let e = try_compile("a { color: ; }").expect_err("expected an error");
  assert_eq!(1, e.status.code());
  assert!(e.message.contains("expected"), "bad message: {}", e.message);
  assert_eq!(Some(1), e.line);
}

#[test]
fn lex_error_is_syntax_status() {
  let e = try_compile("a { content: \"oops; }").expect_err("expected an error");
  assert_eq!(1, e.status.code());
  assert!(e.message.contains("unclosed string"), "bad message: {}", e.message);
}

#[test]
fn import_error_is_import_status() {
  let e = try_compile("@import \"nope\";").expect_err("expected an error");
  assert_eq!(3, e.status.code());
}

#[test]
fn user_error_directive() {
  check_err("a { @error \"boom\"; }", "boom");
}

#[test]
fn json_rendering() {
  let e = try_compile("a { w: $nope; }").expect_err("expected an error");
  let json = e.json();
  assert!(json.contains("\"status\":2"), "bad json: {json}");
  assert!(json.contains("\"message\""), "bad json: {json}");
  assert!(json.contains("\"line\""), "bad json: {json}");
}

#[test]
fn display_includes_location() {
  let e = try_compile("a { w: $nope; }").expect_err("expected an error");
  let shown = e.to_string();
  assert!(shown.contains(":1:"), "bad display: {shown}");
}

#[test]
fn no_partial_css_on_error() {
  // the result type makes this structural: an Err carries no css at all
  assert!(try_compile("a { x: y; }\nb { w: $nope; }").is_err());
}

#[test]
fn sibling_compilation_unaffected_by_failure() {
  assert!(try_compile("a { w: $nope; }").is_err());
  let ok = try_compile("a { x: y; }").expect("should compile");
  assert_eq!("a {\n  x: y;\n}\n", ok.css);
}
