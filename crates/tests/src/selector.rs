//! Selector nesting and expansion.

use crate::check::{check, check_err};

#[test]
fn parent_suffix() {
  check(".a { &:hover { color: red; } }", ".a:hover {\n  color: red;\n}\n");
}

#[test]
fn descendant_nesting() {
  check(".a { .b { x: y; } }", ".a .b {\n  x: y;\n}\n");
}

#[test]
fn comma_cross_product() {
  check(".a, .b { .c { x: y; } }", ".a .c, .b .c {\n  x: y;\n}\n");
}

#[test]
fn parent_in_middle() {
  check(".a { .b & { x: y; } }", ".b .a {\n  x: y;\n}\n");
}

#[test]
fn child_combinator() {
  check(".a { > .b { x: y; } }", ".a > .b {\n  x: y;\n}\n");
}

#[test]
fn deep_nesting() {
  check(
    ".a { .b { .c { x: y; } } }",
    ".a .b .c {\n  x: y;\n}\n",
  );
}

#[test]
fn interpolated_selector() {
  check("$n: 3;\n.m-#{$n} { x: y; }", ".m-3 {\n  x: y;\n}\n");
}

#[test]
fn parent_at_top_level_fails() {
  check_err("& { x: y; }", "`&` used outside of any parent rule");
}

#[test]
fn pseudo_selectors() {
  check("a::before { content: \"x\"; }", "a::before {\n  content: \"x\";\n}\n");
  check("li:nth-child(2n + 1) { x: y; }", "li:nth-child(2n + 1) {\n  x: y;\n}\n");
}

#[test]
fn attribute_selector() {
  check("input[type=text] { x: y; }", "input[type=text] {\n  x: y;\n}\n");
}

#[test]
fn placeholder_alone_emits_nothing() {
  check("%base { x: y; }", "");
}
