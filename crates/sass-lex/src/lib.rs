//! Lexing a string into a sequence of tokens.
//!
//! Both syntaxes produce the same token vocabulary: indented mode synthesizes
//! zero-width `Indent`/`Dedent`/`Eol` tokens from line structure, so the
//! parser handles block shape identically for SCSS and indented input.

mod error;
mod internal;
mod st;

use sass_syntax::Mode;
use sass_syntax::kind::SyntaxKind as SK;
use st::St;
use token::Triviable as _;

pub use error::Error;

/// The result of lexing.
#[derive(Debug, Default)]
pub struct Lex<'a> {
  /// The tokens, including trivia. Concatenating every token's text yields
  /// exactly the input.
  pub tokens: Vec<token::Token<'a, SK>>,
  /// Errors encountered.
  pub errors: Vec<Error>,
}

/// Lexes the input in the given mode.
///
/// # Panics
///
/// Upon internal error.
#[must_use]
pub fn get(s: &str, mode: Mode) -> Lex<'_> {
  match mode {
    Mode::Scss => get_scss(s),
    Mode::Indented => get_indented(s),
  }
}

fn get_scss(s: &str) -> Lex<'_> {
  let mut ret = Lex::default();
  let mut out = error::Output::default();
  let mut st = St::new(s);
  while let Some(b) = st.cur() {
    let start = st.mark();
    let kind = internal::token(&mut st, &mut out, b, true);
    let text = st.non_empty_since(start);
    ret.tokens.push(token::Token { kind, text });
  }
  ret.errors = out.finish();
  ret
}

fn get_indented(s: &str) -> Lex<'_> {
  let mut ret = Lex::default();
  let mut out = error::Output::default();
  let mut st = St::new(s);
  let mut indents = vec![0usize];
  let mut line_had_content = false;
  while let Some(b) = st.cur() {
    if b == b'\n' {
      let start = st.mark();
      let indent = eat_line_breaks(&mut st);
      ret.tokens.push(token::Token { kind: SK::Whitespace, text: st.non_empty_since(start) });
      if st.cur().is_none() {
        break;
      }
      if line_had_content {
        line_structure(&mut ret.tokens, &mut out, &mut indents, indent, st.cur_idx());
        line_had_content = false;
      }
      continue;
    }
    let start = st.mark();
    let kind = internal::token(&mut st, &mut out, b, false);
    if !kind.is_trivia() {
      line_had_content = true;
    }
    ret.tokens.push(token::Token { kind, text: st.non_empty_since(start) });
  }
  if line_had_content {
    ret.tokens.push(token::Token { kind: SK::Eol, text: "" });
  }
  while indents.len() > 1 {
    indents.pop();
    ret.tokens.push(token::Token { kind: SK::Dedent, text: "" });
  }
  ret.errors = out.finish();
  ret
}

/// Consumes the newline plus any blank lines, returning the indentation width
/// of the next non-blank line.
fn eat_line_breaks(st: &mut St<'_>) -> usize {
  let mut indent = 0usize;
  while st.cur() == Some(b'\n') {
    st.bump();
    let m = st.cur_idx();
    st.bump_while(|b| b == b' ' || b == b'\t' || b == b'\r');
    indent = st.cur_idx() - m;
  }
  indent
}

fn line_structure(
  tokens: &mut Vec<token::Token<'_, SK>>,
  out: &mut error::Output,
  indents: &mut Vec<usize>,
  indent: usize,
  idx: usize,
) {
  let cur = *indents.last().expect("indent stack is never empty");
  if indent > cur {
    indents.push(indent);
    tokens.push(token::Token { kind: SK::Indent, text: "" });
    return;
  }
  tokens.push(token::Token { kind: SK::Eol, text: "" });
  while indent < *indents.last().expect("indent stack is never empty") {
    indents.pop();
    tokens.push(token::Token { kind: SK::Dedent, text: "" });
  }
  if indent != *indents.last().expect("indent stack is never empty") {
    out.err(idx, error::Kind::InconsistentDedent);
    indents.push(indent);
  }
}

#[cfg(test)]
mod tests {
  use super::{Mode, SK, get};

  fn kinds(s: &str, mode: Mode) -> Vec<SK> {
    let lex = get(s, mode);
    assert!(lex.errors.is_empty(), "lex errors: {:?}", lex.errors);
    lex.tokens.into_iter().map(|t| t.kind).filter(|k| !matches!(k, SK::Whitespace)).collect()
  }

  #[test]
  fn scss_smoke() {
    let got = kinds("a { color: red; }", Mode::Scss);
    let want = vec![
      SK::Ident,
      SK::LCurly,
      SK::Ident,
      SK::Colon,
      SK::Ident,
      SK::Semicolon,
      SK::RCurly,
    ];
    assert_eq!(want, got);
  }

  #[test]
  fn number_and_unit() {
    let got = kinds("width: 1.5px", Mode::Scss);
    let want = vec![SK::Ident, SK::Colon, SK::Number, SK::Ident];
    assert_eq!(want, got);
  }

  #[test]
  fn variable_and_interpolation() {
    let got = kinds("$x: #{1 + 2}", Mode::Scss);
    let want =
      vec![SK::Variable, SK::Colon, SK::HashLCurly, SK::Number, SK::Plus, SK::Number, SK::RCurly];
    assert_eq!(want, got);
  }

  #[test]
  fn indented_blocks() {
    let got = kinds("a\n  color: red\nb\n  top: 0\n", Mode::Indented);
    let want = vec![
      SK::Ident,
      SK::Indent,
      SK::Ident,
      SK::Colon,
      SK::Ident,
      SK::Eol,
      SK::Dedent,
      SK::Ident,
      SK::Indent,
      SK::Ident,
      SK::Colon,
      SK::Number,
      SK::Eol,
      SK::Dedent,
    ];
    assert_eq!(want, got);
  }

  #[test]
  fn round_trips() {
    let s = "a { /* c */ width: calc(100% - 2px); }";
    let lex = get(s, Mode::Scss);
    let text: String = lex.tokens.iter().map(|t| t.text).collect();
    assert_eq!(s, text);
  }
}
