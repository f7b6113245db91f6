//! Rule flattening: ordering, empty rules, duplicates, at-rule bubbling.

use crate::check::check;

#[test]
fn zero_nesting_round_trip() {
  check(
    "a { color: red; top: 0; }",
    "a {\n  color: red;\n  top: 0;\n}\n",
  );
}

#[test]
fn sibling_rules() {
  check(
    "a { color: red; } b { top: 0; }",
    "a {\n  color: red;\n}\n\nb {\n  top: 0;\n}\n",
  );
}

#[test]
fn parent_before_children() {
  check(
    ".a { color: red; .b { top: 0; } left: 1px; }",
    ".a {\n  color: red;\n  left: 1px;\n}\n\n.a .b {\n  top: 0;\n}\n",
  );
}

#[test]
fn empty_rule_dropped() {
  check("a { }", "");
  check("a { b { } }", "");
}

#[test]
fn duplicate_properties_preserved() {
  check(
    "a { color: red; color: blue; }",
    "a {\n  color: red;\n  color: blue;\n}\n",
  );
}

#[test]
fn important_flag() {
  check("a { color: red !important; }", "a {\n  color: red !important;\n}\n");
}

#[test]
fn null_value_drops_declaration() {
  check("a { color: null; top: 0; }", "a {\n  top: 0;\n}\n");
}

#[test]
fn media_at_top_level() {
  check(
    "@media screen { a { color: red; } }",
    "@media screen {\n  a {\n    color: red;\n  }\n}\n",
  );
}

#[test]
fn media_bubbles_out_of_rule() {
  check(
    "a { @media screen { color: red; } }",
    "@media screen {\n  a {\n    color: red;\n  }\n}\n",
  );
}

#[test]
fn media_after_parent_rule() {
  check(
    "a { color: blue; @media screen { color: red; } }",
    "a {\n  color: blue;\n}\n\n@media screen {\n  a {\n    color: red;\n  }\n}\n",
  );
}

#[test]
fn bodiless_at_rule() {
  check("@charset \"utf-8\";\na { x: y; }", "a {\n  x: y;\n}\n");
}

#[test]
fn unknown_at_rule_passthrough() {
  check(
    "@font-face { font-family: x; src: url(x.woff); }",
    "@font-face {\n  font-family: x;\n  src: url(x.woff);\n}\n",
  );
}
