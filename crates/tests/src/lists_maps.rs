//! Lists and maps: literals, functions, 1-based indexing.

use crate::check::{check, check_err};

#[test]
fn space_list() {
  check("a { margin: 0 auto; }", "a {\n  margin: 0 auto;\n}\n");
}

#[test]
fn comma_list() {
  check("a { font-family: serif, sans-serif; }", "a {\n  font-family: serif, sans-serif;\n}\n");
}

#[test]
fn length_fn() {
  check("a { n: length(1 2 3); }", "a {\n  n: 3;\n}\n");
  check("a { n: length((a: 1, b: 2)); }", "a {\n  n: 2;\n}\n");
}

#[test]
fn nth_is_one_based() {
  check("a { x: nth(10px 20px 30px, 1); }", "a {\n  x: 10px;\n}\n");
  check("a { x: nth(10px 20px 30px, 3); }", "a {\n  x: 30px;\n}\n");
}

#[test]
fn nth_zero_fails() {
  check_err("a { x: nth(1 2 3, 0); }", "out of bounds");
}

#[test]
fn nth_negative_fails() {
  check_err("a { x: nth(1 2 3, -1); }", "out of bounds");
}

#[test]
fn nth_past_end_fails() {
  check_err("a { x: nth(1 2 3, 4); }", "out of bounds");
}

#[test]
fn join_lists() {
  check("a { x: join(1 2, 3 4); }", "a {\n  x: 1 2 3 4;\n}\n");
  check("a { x: join((1, 2), (3, 4)); }", "a {\n  x: 1, 2, 3, 4;\n}\n");
}

#[test]
fn append_list() {
  check("a { x: append(1 2, 3); }", "a {\n  x: 1 2 3;\n}\n");
}

#[test]
fn index_fn() {
  check("a { x: index(a b c, b); }", "a {\n  x: 2;\n}\n");
  // a miss is null, which drops the declaration and then the empty rule
  check("a { x: index(a b c, z); }", "");
}

#[test]
fn zip_lists() {
  check("a { x: zip(1px 2px, solid dashed); }", "a {\n  x: 1px solid, 2px dashed;\n}\n");
}

#[test]
fn list_separator_fn() {
  check("a { x: list-separator(1 2); }", "a {\n  x: space;\n}\n");
  check("a { x: list-separator((1, 2)); }", "a {\n  x: comma;\n}\n");
}

#[test]
fn map_get() {
  check("$m: (a: 1, b: 2);\nx { y: map-get($m, b); }", "x {\n  y: 2;\n}\n");
}

#[test]
fn map_get_missing_is_null() {
  check("$m: (a: 1);\nx { y: map-get($m, z); }", "");
}

#[test]
fn map_has_key() {
  check("$m: (a: 1);\nx { y: map-has-key($m, a); }", "x {\n  y: true;\n}\n");
}

#[test]
fn map_merge_preserves_order() {
  check(
    "$m: map-merge((a: 1, b: 2), (b: 3, c: 4));\nx { y: map-get($m, b); z: length($m); }",
    "x {\n  y: 3;\n  z: 3;\n}\n",
  );
}

#[test]
fn map_remove() {
  check("$m: map-remove((a: 1, b: 2), a);\nx { y: length($m); }", "x {\n  y: 1;\n}\n");
}

#[test]
fn map_keys_values() {
  check("x { y: map-keys((a: 1, b: 2)); }", "x {\n  y: a, b;\n}\n");
  check("x { y: map-values((a: 1, b: 2)); }", "x {\n  y: 1, 2;\n}\n");
}

#[test]
fn map_on_non_map_fails() {
  check_err("x { y: map-get(1px, a); }", "expected a map");
}

#[test]
fn bracketed_list() {
  check("a { grid: [row-start] 1fr; }", "a {\n  grid: [row-start] 1fr;\n}\n");
}
