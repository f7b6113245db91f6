//! Colors: literals, constructors, channel ops, hsl functions.

use crate::check::{check, check_err};

#[test]
fn hex_literal() {
  check("a { c: #abcdef; }", "a {\n  c: #abcdef;\n}\n");
}

#[test]
fn short_hex_expands() {
  check("a { c: #abc; }", "a {\n  c: #aabbcc;\n}\n");
}

#[test]
fn rgb_fn() {
  check("a { c: rgb(255, 0, 0); }", "a {\n  c: #ff0000;\n}\n");
}

#[test]
fn rgb_percent_channels() {
  check("a { c: rgb(100%, 0%, 0%); }", "a {\n  c: #ff0000;\n}\n");
}

#[test]
fn rgba_fn() {
  check("a { c: rgba(255, 0, 0, 0.5); }", "a {\n  c: rgba(255, 0, 0, 0.5);\n}\n");
}

#[test]
fn rgba_from_color() {
  check("a { c: rgba(#ff0000, 0.25); }", "a {\n  c: rgba(255, 0, 0, 0.25);\n}\n");
}

#[test]
fn channel_accessors() {
  check("a { r: red(#102030); g: green(#102030); b: blue(#102030); }",
    "a {\n  r: 16;\n  g: 32;\n  b: 48;\n}\n");
}

#[test]
fn alpha_accessor() {
  check("a { al: alpha(rgba(0, 0, 0, 0.5)); }", "a {\n  al: 0.5;\n}\n");
}

#[test]
fn addition_clamps() {
  check("a { c: #ff0000 + #010203; }", "a {\n  c: #ff0203;\n}\n");
}

#[test]
fn color_plus_number() {
  check("a { c: #101010 + 16; }", "a {\n  c: #202020;\n}\n");
}

#[test]
fn mix_colors() {
  check("a { c: mix(#ff0000, #0000ff); }", "a {\n  c: #800080;\n}\n");
}

#[test]
fn mix_weighted() {
  check("a { c: mix(#ff0000, #0000ff, 100%); }", "a {\n  c: #ff0000;\n}\n");
}

#[test]
fn lighten_darken() {
  check("a { c: lighten(#800000, 10%); }", "a {\n  c: #b30000;\n}\n");
  check("a { c: darken(#b30000, 10%); }", "a {\n  c: #800000;\n}\n");
}

#[test]
fn grayscale_fn() {
  check("a { c: grayscale(#ff0000); }", "a {\n  c: #808080;\n}\n");
}

#[test]
fn invert_fn() {
  check("a { c: invert(#102030); }", "a {\n  c: #efdfcf;\n}\n");
}

#[test]
fn opacify_transparentize() {
  check("a { c: opacify(rgba(0, 0, 0, 0.5), 25%); }", "a {\n  c: rgba(0, 0, 0, 0.75);\n}\n");
  check(
    "a { c: transparentize(rgba(0, 0, 0, 0.5), 25%); }",
    "a {\n  c: rgba(0, 0, 0, 0.25);\n}\n",
  );
}

#[test]
fn channel_of_non_color() {
  check_err("a { c: red(1px); }", "expected a color");
}
