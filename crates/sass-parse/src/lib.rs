//! Parsing a sequence of tokens into the arena AST.
//!
//! Both syntax front ends share this grammar: the lexer has already reduced
//! block structure to open/close/terminate tokens, so the only extra work for
//! indented input happens before parsing.

mod expr;
mod internal;

use sass_syntax::kind::SyntaxKind as SK;
use std::fmt;
use text_size::TextRange;

/// The result of parsing one file.
#[derive(Debug)]
pub struct Parse {
  /// The top-level statements, in source order.
  pub top: Vec<sass_ast::StmtMust>,
  /// Errors encountered.
  pub errors: Vec<Error>,
}

/// Parses the tokens of one file into the shared arenas.
#[must_use]
pub fn get(
  ars: &mut sass_ast::Arenas,
  ptrs: &mut sass_ast::Pointers,
  file: paths::PathId,
  tokens: &[token::Token<'_, SK>],
) -> Parse {
  let mut p = internal::P::new(ars, ptrs, file, tokens);
  let top = internal::items(&mut p);
  internal::trailing(&mut p);
  p.finish(top)
}

/// A parse error.
#[derive(Debug)]
pub struct Error {
  /// The source range of the error.
  pub range: TextRange,
  pub(crate) expected: Expected,
  pub(crate) found: Option<SK>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Expected {
  Expr,
  Statement,
  Block,
  Ident,
  Variable,
  Kind(SK),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("expected ")?;
    match self.expected {
      Expected::Expr => f.write_str("an expression")?,
      Expected::Statement => f.write_str("a statement")?,
      Expected::Block => f.write_str("a block")?,
      Expected::Ident => f.write_str("a name")?,
      Expected::Variable => f.write_str("a variable")?,
      Expected::Kind(k) => k.fmt(f)?,
    }
    match self.found {
      None => f.write_str(", found end of file"),
      Some(k) => write!(f, ", found {k}"),
    }
  }
}
