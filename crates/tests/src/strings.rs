//! String values and functions.

use crate::check::{check, check_err};

#[test]
fn quoted_stays_quoted() {
  check("a { content: \"hi\"; }", "a {\n  content: \"hi\";\n}\n");
}

#[test]
fn concat_keeps_left_quoting() {
  check("a { content: \"foo\" + bar; }", "a {\n  content: \"foobar\";\n}\n");
  check("a { content: foo + \"bar\"; }", "a {\n  content: foobar;\n}\n");
}

#[test]
fn quote_unquote() {
  check("a { c: quote(foo); }", "a {\n  c: \"foo\";\n}\n");
  check("a { c: unquote(\"foo\"); }", "a {\n  c: foo;\n}\n");
}

#[test]
fn str_length() {
  check("a { n: str-length(\"hello\"); }", "a {\n  n: 5;\n}\n");
}

#[test]
fn str_index() {
  check("a { n: str-index(\"hello\", \"ll\"); }", "a {\n  n: 3;\n}\n");
}

#[test]
fn str_index_missing_is_null() {
  // a null value drops the declaration, and an empty rule is dropped
  check("a { n: str-index(\"hello\", \"xyz\"); }", "");
}

#[test]
fn str_insert() {
  check(
    "a { s: str-insert(\"abcd\", \"X\", 1); }",
    "a {\n  s: \"Xabcd\";\n}\n",
  );
  check(
    "a { s: str-insert(\"abcd\", \"X\", 5); }",
    "a {\n  s: \"abcdX\";\n}\n",
  );
}

#[test]
fn str_insert_out_of_range() {
  check_err("a { s: str-insert(\"abcd\", \"X\", 0); }", "out of bounds");
}

#[test]
fn str_slice() {
  check("a { s: str-slice(\"abcd\", 2, 3); }", "a {\n  s: \"bc\";\n}\n");
  check("a { s: str-slice(\"abcd\", 2); }", "a {\n  s: \"bcd\";\n}\n");
}

#[test]
fn case_functions() {
  check("a { s: to-upper-case(\"abc\"); }", "a {\n  s: \"ABC\";\n}\n");
  check("a { s: to-lower-case(\"ABC\"); }", "a {\n  s: \"abc\";\n}\n");
}

#[test]
fn interpolation_in_value() {
  check("$i: 2;\na { w: #{$i}px; }", "a {\n  w: 2px;\n}\n");
}

#[test]
fn interpolation_in_property_name() {
  check("a { #{bor}der: none; }", "a {\n  border: none;\n}\n");
}
