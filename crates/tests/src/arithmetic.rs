//! Arithmetic and operators.

use crate::check::{check, check_err};

#[test]
fn same_unit_add() {
  check("a { width: 10px + 5px; }", "a {\n  width: 15px;\n}\n");
}

#[test]
fn incompatible_units() {
  check_err("a { width: 10px + 5em; }", "incompatible units");
}

#[test]
fn family_conversion() {
  check("a { width: 1in + 48px; }", "a {\n  width: 1.5in;\n}\n");
}

#[test]
fn precedence() {
  check("a { width: 1 + 2 * 3; }", "a {\n  width: 7;\n}\n");
}

#[test]
fn parens() {
  check("a { width: (1 + 2) * 3; }", "a {\n  width: 9;\n}\n");
}

#[test]
fn division() {
  check("a { width: 10px / 2; }", "a {\n  width: 5px;\n}\n");
}

#[test]
fn division_cancels_units() {
  check("a { width: 10px / 2px; }", "a {\n  width: 5;\n}\n");
}

#[test]
fn divide_by_zero() {
  check_err("a { width: 1 / 0; }", "division by zero");
}

#[test]
fn modulo() {
  check("a { width: 7 % 4; }", "a {\n  width: 3;\n}\n");
}

#[test]
fn unary_minus() {
  check("a { margin: -5px; }", "a {\n  margin: -5px;\n}\n");
}

#[test]
fn space_list_with_negative() {
  check("a { margin: 10px -5px; }", "a {\n  margin: 10px -5px;\n}\n");
}

#[test]
fn subtraction_needs_space_on_both_sides() {
  check("a { width: 10px - 5px; }", "a {\n  width: 5px;\n}\n");
}

#[test]
fn comparison() {
  check("a { ok: 1px < 2px; }", "a {\n  ok: true;\n}\n");
  check("a { ok: 2 >= 3; }", "a {\n  ok: false;\n}\n");
}

#[test]
fn comparison_across_units() {
  check("a { ok: 1in == 96px; }", "a {\n  ok: true;\n}\n");
}

#[test]
fn and_or_not() {
  check("a { ok: true and false; }", "a {\n  ok: false;\n}\n");
  check("a { ok: false or 3; }", "a {\n  ok: 3;\n}\n");
  check("a { ok: not null; }", "a {\n  ok: true;\n}\n");
}

#[test]
fn precision_rounds() {
  check("a { w: 1 / 3; }", "a {\n  w: 0.33333;\n}\n");
}

#[test]
fn percent_unit() {
  check("a { w: 50% + 25%; }", "a {\n  w: 75%;\n}\n");
}

#[test]
fn deterministic() {
  let src = "a { w: 1 + 2; } b { c: lighten(#800000, 10%); }";
  assert_eq!(crate::check::compile(src), crate::check::compile(src));
}
