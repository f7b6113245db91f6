//! User-defined functions and the builtin registry.

use crate::check::{check, check_err};

#[test]
fn simple_function() {
  check(
    "@function double($x) { @return $x * 2; }\na { w: double(4px); }",
    "a {\n  w: 8px;\n}\n",
  );
}

#[test]
fn function_with_control_flow() {
  check(
    "@function pick($n) { @if $n > 1 { @return big; } @return small; }\na { s: pick(2); t: pick(0); }",
    "a {\n  s: big;\n  t: small;\n}\n",
  );
}

#[test]
fn recursive_function() {
  check(
    "@function fact($n) { @if $n <= 1 { @return 1; } @return $n * fact($n - 1); }\na { w: fact(5); }",
    "a {\n  w: 120;\n}\n",
  );
}

#[test]
fn user_definition_shadows_builtin() {
  check(
    "@function str-length($s) { @return 42; }\na { n: str-length(\"abc\"); }",
    "a {\n  n: 42;\n}\n",
  );
}

#[test]
fn missing_return_fails() {
  check_err("@function f() { $x: 1; }\na { w: f(); }", "without `@return`");
}

#[test]
fn return_outside_function_fails() {
  check_err("a { @return 1; }", "`@return` outside of any function");
}

#[test]
fn undefined_function_passes_through() {
  check("a { filter: blur(4px); }", "a {\n  filter: blur(4px);\n}\n");
}

#[test]
fn calc_passes_through_verbatim() {
  check("a { width: calc(100% - 2px); }", "a {\n  width: calc(100% - 2px);\n}\n");
}

#[test]
fn var_passes_through_verbatim() {
  check("a { color: var(--main, #fff); }", "a {\n  color: var(--main, #fff);\n}\n");
}

#[test]
fn if_builtin() {
  check("a { w: if(1 < 2, yes, no); }", "a {\n  w: yes;\n}\n");
}

#[test]
fn type_of_builtin() {
  check(
    "a { t: type-of(1px) type-of(\"s\") type-of(#fff) type-of(null); }",
    "a {\n  t: number string color null;\n}\n",
  );
}

#[test]
fn math_builtins() {
  check(
    "a { c: ceil(1.2); f: floor(1.8); r: round(1.5); ab: abs(-3px); }",
    "a {\n  c: 2;\n  f: 2;\n  r: 2;\n  ab: 3px;\n}\n",
  );
}

#[test]
fn min_max_builtins() {
  check("a { x: min(3px, 1px, 2px); y: max(1, 5, 3); }", "a {\n  x: 1px;\n  y: 5;\n}\n");
}

#[test]
fn percentage_builtin() {
  check("a { x: percentage(0.25); }", "a {\n  x: 25%;\n}\n");
  check_err("a { x: percentage(1px); }", "unitless");
}

#[test]
fn unit_builtins() {
  check(
    "a { u: unit(1px); l: unitless(3); c: comparable(1px, 1in); d: comparable(1px, 1s); }",
    "a {\n  u: \"px\";\n  l: true;\n  c: true;\n  d: false;\n}\n",
  );
}
