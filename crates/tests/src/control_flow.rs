//! `@if`, `@each`, `@for`, `@while`, and variable scoping.

use crate::check::{check, check_err};

#[test]
fn if_taken() {
  check("a { @if 1 < 2 { color: red; } }", "a {\n  color: red;\n}\n");
}

#[test]
fn if_not_taken() {
  check("a { @if 1 > 2 { color: red; } }", "");
}

#[test]
fn if_else() {
  check(
    "a { @if false { x: 1; } @else { x: 2; } }",
    "a {\n  x: 2;\n}\n",
  );
}

#[test]
fn else_if_chain() {
  check(
    "$v: 2;\na { @if $v == 1 { x: one; } @else if $v == 2 { x: two; } @else { x: other; } }",
    "a {\n  x: two;\n}\n",
  );
}

#[test]
fn each_over_list() {
  check(
    "@each $c in red, green { .#{$c} { color: $c; } }",
    ".red {\n  color: red;\n}\n\n.green {\n  color: green;\n}\n",
  );
}

#[test]
fn each_over_map_destructures() {
  check(
    "@each $k, $v in (a: 1, b: 2) { .#{$k} { n: $v; } }",
    ".a {\n  n: 1;\n}\n\n.b {\n  n: 2;\n}\n",
  );
}

#[test]
fn for_through_is_inclusive() {
  check(
    "@for $i from 1 through 3 { .m-#{$i} { w: #{$i}px; } }",
    ".m-1 {\n  w: 1px;\n}\n\n.m-2 {\n  w: 2px;\n}\n\n.m-3 {\n  w: 3px;\n}\n",
  );
}

#[test]
fn for_to_is_exclusive() {
  check(
    "@for $i from 1 to 3 { .m-#{$i} { w: #{$i}px; } }",
    ".m-1 {\n  w: 1px;\n}\n\n.m-2 {\n  w: 2px;\n}\n",
  );
}

#[test]
fn for_descending() {
  check(
    "@for $i from 3 through 1 { .m-#{$i} { z: $i; } }",
    ".m-3 {\n  z: 3;\n}\n\n.m-2 {\n  z: 2;\n}\n\n.m-1 {\n  z: 1;\n}\n",
  );
}

#[test]
fn for_non_integer_fails() {
  check_err("@for $i from 1 through 2.5 { a { x: $i; } }", "must be integers");
}

#[test]
fn while_loop() {
  check(
    "$i: 1;\n@while $i <= 2 { .w-#{$i} { n: $i; } $i: $i + 1; }",
    ".w-1 {\n  n: 1;\n}\n\n.w-2 {\n  n: 2;\n}\n",
  );
}

#[test]
fn default_keeps_existing() {
  check("$a: 1;\n$a: 2 !default;\nb { c: $a; }", "b {\n  c: 1;\n}\n");
}

#[test]
fn default_fills_null() {
  check("$a: null;\n$a: 2 !default;\nb { c: $a; }", "b {\n  c: 2;\n}\n");
}

#[test]
fn global_writes_root_scope() {
  check(
    "$a: 1;\nb { $a: 2 !global; c: $a; }\nd { e: $a; }",
    "b {\n  c: 2;\n}\n\nd {\n  e: 2;\n}\n",
  );
}

#[test]
fn loop_variable_is_scoped() {
  check(
    "$i: keep;\n@for $i from 1 through 1 { a { x: $i; } }\nb { y: $i; }",
    "a {\n  x: 1;\n}\n\nb {\n  y: keep;\n}\n",
  );
}
