//! The kinds of token.

use std::fmt;

/// A token kind.
///
/// Block structure lives in the token stream itself: in indented mode the
/// lexer synthesizes zero-width [`SyntaxKind::Indent`],
/// [`SyntaxKind::Dedent`], and [`SyntaxKind::Eol`] tokens, so the parser sees
/// the same open/close/terminate shape in both syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
  /// Spaces, tabs, newlines.
  Whitespace,
  /// A `/* ... */` comment.
  BlockComment,
  /// A `/*! ... */` comment, preserved in output.
  LoudComment,
  /// A `// ...` comment.
  LineComment,
  /// Zero-width statement terminator, indented mode only.
  Eol,
  /// Zero-width block open, indented mode only.
  Indent,
  /// Zero-width block close, indented mode only.
  Dedent,
  /// An identifier, like `color` or `-webkit-flex`.
  Ident,
  /// A number, like `3` or `1.5`.
  Number,
  /// A quoted string, including its delimiters.
  String,
  /// A variable, like `$width`.
  Variable,
  /// An at-keyword, like `@media`.
  AtKeyword,
  /// A hash followed by identifier or hex characters, like `#fff` or `#main`.
  HashIdent,
  /// `#{`
  HashLCurly,
  /// `==`
  EqEq,
  /// `!=`
  BangEq,
  /// `<=`
  LtEq,
  /// `>=`
  GtEq,
  /// `{`
  LCurly,
  /// `}`
  RCurly,
  /// `(`
  LRound,
  /// `)`
  RRound,
  /// `[`
  LSquare,
  /// `]`
  RSquare,
  /// `;`
  Semicolon,
  /// `:`
  Colon,
  /// `,`
  Comma,
  /// `.`
  Dot,
  /// `+`
  Plus,
  /// `-`
  Minus,
  /// `*`
  Star,
  /// `/`
  Slash,
  /// `%`
  Percent,
  /// `=`
  Eq,
  /// `<`
  Lt,
  /// `>`
  Gt,
  /// `!`
  Bang,
  /// `&`
  Amp,
  /// `~`
  Tilde,
  /// `#`
  Hash,
  /// Anything else.
  Invalid,
}

impl SyntaxKind {
  /// Punctuation tokens, longest first so prefixes never shadow. `#`-prefixed
  /// tokens are handled before this table is consulted.
  pub const PUNCTUATION: [(&'static [u8], SyntaxKind); 25] = [
    (b"==", SyntaxKind::EqEq),
    (b"!=", SyntaxKind::BangEq),
    (b"<=", SyntaxKind::LtEq),
    (b">=", SyntaxKind::GtEq),
    (b"{", SyntaxKind::LCurly),
    (b"}", SyntaxKind::RCurly),
    (b"(", SyntaxKind::LRound),
    (b")", SyntaxKind::RRound),
    (b"[", SyntaxKind::LSquare),
    (b"]", SyntaxKind::RSquare),
    (b";", SyntaxKind::Semicolon),
    (b":", SyntaxKind::Colon),
    (b",", SyntaxKind::Comma),
    (b".", SyntaxKind::Dot),
    (b"+", SyntaxKind::Plus),
    (b"-", SyntaxKind::Minus),
    (b"*", SyntaxKind::Star),
    (b"/", SyntaxKind::Slash),
    (b"%", SyntaxKind::Percent),
    (b"=", SyntaxKind::Eq),
    (b"<", SyntaxKind::Lt),
    (b">", SyntaxKind::Gt),
    (b"!", SyntaxKind::Bang),
    (b"~", SyntaxKind::Tilde),
    (b"&", SyntaxKind::Amp),
  ];

  /// A human-readable description, for error messages.
  #[must_use]
  pub fn token_desc(self) -> &'static str {
    match self {
      SyntaxKind::Whitespace => "whitespace",
      SyntaxKind::BlockComment | SyntaxKind::LoudComment => "a block comment",
      SyntaxKind::LineComment => "a line comment",
      SyntaxKind::Eol => "end of line",
      SyntaxKind::Indent => "an indented block",
      SyntaxKind::Dedent => "end of an indented block",
      SyntaxKind::Ident => "an identifier",
      SyntaxKind::Number => "a number",
      SyntaxKind::String => "a string",
      SyntaxKind::Variable => "a variable",
      SyntaxKind::AtKeyword => "an at-keyword",
      SyntaxKind::HashIdent => "`#` followed by a name",
      SyntaxKind::HashLCurly => "`#{`",
      SyntaxKind::EqEq => "`==`",
      SyntaxKind::BangEq => "`!=`",
      SyntaxKind::LtEq => "`<=`",
      SyntaxKind::GtEq => "`>=`",
      SyntaxKind::LCurly => "`{`",
      SyntaxKind::RCurly => "`}`",
      SyntaxKind::LRound => "`(`",
      SyntaxKind::RRound => "`)`",
      SyntaxKind::LSquare => "`[`",
      SyntaxKind::RSquare => "`]`",
      SyntaxKind::Semicolon => "`;`",
      SyntaxKind::Colon => "`:`",
      SyntaxKind::Comma => "`,`",
      SyntaxKind::Dot => "`.`",
      SyntaxKind::Plus => "`+`",
      SyntaxKind::Minus => "`-`",
      SyntaxKind::Star => "`*`",
      SyntaxKind::Slash => "`/`",
      SyntaxKind::Percent => "`%`",
      SyntaxKind::Eq => "`=`",
      SyntaxKind::Lt => "`<`",
      SyntaxKind::Gt => "`>`",
      SyntaxKind::Bang => "`!`",
      SyntaxKind::Amp => "`&`",
      SyntaxKind::Tilde => "`~`",
      SyntaxKind::Hash => "`#`",
      SyntaxKind::Invalid => "invalid input",
    }
  }
}

impl token::Triviable for SyntaxKind {
  fn is_trivia(&self) -> bool {
    matches!(
      self,
      SyntaxKind::Whitespace | SyntaxKind::BlockComment | SyntaxKind::LineComment
    )
  }
}

impl fmt::Display for SyntaxKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.token_desc())
  }
}
