//! Token kinds and syntax modes for the Sass dialects.

pub mod kind;

/// Which concrete syntax a file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Brace-delimited syntax, aka SCSS.
  Scss,
  /// Indentation-delimited syntax.
  Indented,
}

impl Mode {
  /// Guesses the mode from a file extension, defaulting to SCSS.
  #[must_use]
  pub fn from_extension(ext: Option<&str>) -> Self {
    match ext {
      Some("sass") => Self::Indented,
      _ => Self::Scss,
    }
  }
}
