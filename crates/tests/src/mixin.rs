//! Mixins: definition, inclusion, arguments, `@content`.

use crate::check::{check, check_err};

#[test]
fn simple_include() {
  check(
    "@mixin reset { margin: 0; }\na { @include reset; }",
    "a {\n  margin: 0;\n}\n",
  );
}

#[test]
fn args_and_defaults() {
  check(
    "@mixin box($w, $h: $w) { width: $w; height: $h; }\na { @include box(10px); }",
    "a {\n  width: 10px;\n  height: 10px;\n}\n",
  );
}

#[test]
fn named_args() {
  check(
    "@mixin box($w: 1px, $h: 2px) { width: $w; height: $h; }\na { @include box($h: 9px); }",
    "a {\n  width: 1px;\n  height: 9px;\n}\n",
  );
}

#[test]
fn missing_required_arg() {
  check_err("@mixin m($x) { a: $x; }\nb { @include m; }", "missing argument");
}

#[test]
fn too_many_args() {
  check_err("@mixin m($x) { a: $x; }\nb { @include m(1, 2); }", "too many arguments");
}

#[test]
fn unknown_named_arg() {
  check_err("@mixin m($x) { a: $x; }\nb { @include m($y: 1); }", "no argument named");
}

#[test]
fn undefined_mixin() {
  check_err("a { @include nope; }", "undefined mixin");
}

#[test]
fn content_block() {
  check(
    "@mixin wrap { .inner { @content; } }\n@include wrap { color: red; }",
    ".inner {\n  color: red;\n}\n",
  );
}

#[test]
fn content_sees_include_site_variables() {
  check(
    "@mixin wrap { .inner { @content; } }\n$c: blue;\n@include wrap { color: $c; }",
    ".inner {\n  color: blue;\n}\n",
  );
}

#[test]
fn include_without_content_block() {
  check(
    "@mixin wrap { .inner { @content; } }\n@include wrap;",
    "",
  );
}

#[test]
fn content_outside_mixin_fails() {
  check_err("a { @content; }", "`@content` outside of any mixin");
}

#[test]
fn mixin_emitting_rules() {
  check(
    "@mixin theme($name) { .#{$name} { color: red; } }\n@include theme(dark);",
    ".dark {\n  color: red;\n}\n",
  );
}
