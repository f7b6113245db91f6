//! `@extend`: registration, second-pass resolution, `!optional`.

use crate::check::{check, check_err};

#[test]
fn class_extends_class() {
  check(
    ".error { color: red; }\n.fatal { @extend .error; border: 1px; }",
    ".error, .fatal {\n  color: red;\n}\n\n.fatal {\n  border: 1px;\n}\n",
  );
}

#[test]
fn extend_applies_to_later_rules_too() {
  check(
    ".fatal { @extend .error; }\n.error { color: red; }",
    ".error, .fatal {\n  color: red;\n}\n",
  );
}

#[test]
fn extend_inside_compound() {
  check(
    "a.error:hover { color: red; }\n.fatal { @extend .error; }",
    "a.error:hover, a.fatal:hover {\n  color: red;\n}\n",
  );
}

#[test]
fn extend_missing_target_fails() {
  check_err(".fatal { @extend .nope; }", "matched no selector");
}

#[test]
fn extend_missing_target_optional_ok() {
  check(".fatal { @extend .nope !optional; x: y; }", ".fatal {\n  x: y;\n}\n");
}

#[test]
fn extend_placeholder() {
  check(
    "%base { color: red; }\n.a { @extend %base; }",
    ".a {\n  color: red;\n}\n",
  );
}

#[test]
fn placeholder_with_two_extenders() {
  check(
    "%base { color: red; }\n.a { @extend %base; }\n.b { @extend %base; }",
    ".a, .b {\n  color: red;\n}\n",
  );
}

#[test]
fn extend_outside_rule_fails() {
  check_err("@extend .a;", "`@extend` outside of any rule");
}

#[test]
fn extend_into_nested_rule() {
  check(
    ".base { .inner { color: red; } }\n.other { @extend .base; }",
    ".base .inner, .other .inner {\n  color: red;\n}\n",
  );
}
