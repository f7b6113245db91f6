//! The structured error surface.

use std::fmt;

/// The class of failure, exposed as a numeric status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  /// Lexing or parsing failed.
  Syntax,
  /// Evaluation failed.
  Eval,
  /// Import resolution failed, or a file could not be read.
  Import,
}

impl Status {
  /// The numeric code.
  #[must_use]
  pub fn code(self) -> u32 {
    match self {
      Status::Syntax => 1,
      Status::Eval => 2,
      Status::Import => 3,
    }
  }
}

/// A structured compile error. One of these aborts the whole compilation; no
/// partial CSS accompanies it.
#[derive(Debug, Clone)]
pub struct CompileError {
  pub message: String,
  /// The file the error points into, if known.
  pub path: Option<std::path::PathBuf>,
  /// 1-based line.
  pub line: Option<u32>,
  /// 1-based column.
  pub column: Option<u32>,
  pub status: Status,
}

impl CompileError {
  pub(crate) fn plain(status: Status, message: impl Into<String>) -> Self {
    Self { message: message.into(), path: None, line: None, column: None, status }
  }

  /// The machine-readable JSON rendering.
  #[must_use]
  pub fn json(&self) -> String {
    let mut map = serde_json::Map::<String, serde_json::Value>::new();
    map.insert("message".to_owned(), serde_json::json!(self.message));
    map.insert("status".to_owned(), serde_json::json!(self.status.code()));
    if let Some(path) = &self.path {
      map.insert("file".to_owned(), serde_json::json!(path.display().to_string()));
    }
    if let Some(line) = self.line {
      map.insert("line".to_owned(), serde_json::json!(line));
    }
    if let Some(column) = self.column {
      map.insert("column".to_owned(), serde_json::json!(column));
    }
    serde_json::Value::Object(map).to_string()
  }
}

impl fmt::Display for CompileError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(path) = &self.path {
      write!(f, "{}", path.display())?;
      if let (Some(line), Some(col)) = (self.line, self.column) {
        write!(f, ":{line}:{col}")?;
      }
      f.write_str(": ")?;
    }
    f.write_str(&self.message)
  }
}

impl std::error::Error for CompileError {}
