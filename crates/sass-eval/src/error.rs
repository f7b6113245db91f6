//! Evaluation errors.

use sass_ast::{Str, StrArena};
use sass_val::Unit;
use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An evaluation error, tied to the node it arose at.
#[derive(Debug, Clone)]
pub struct Error {
  pub at: At,
  pub kind: Kind,
}

/// The node an error is attached to.
#[derive(Debug, Clone, Copy)]
pub enum At {
  Expr(sass_ast::ExprMust),
  Stmt(sass_ast::StmtMust),
}

#[derive(Debug, Clone, Copy)]
pub enum NameKind {
  Variable,
  Mixin,
  Function,
}

impl NameKind {
  fn desc(self) -> &'static str {
    match self {
      NameKind::Variable => "variable",
      NameKind::Mixin => "mixin",
      NameKind::Function => "function",
    }
  }
}

#[derive(Debug, Clone)]
pub enum Kind {
  UnitMismatch { lhs: Unit, rhs: Unit },
  UndefinedName { name: Str, what: NameKind },
  Index { index: f64, len: usize },
  ExtendNotFound { target: String },
  IncompatibleTypes { op: &'static str, lhs: &'static str, rhs: &'static str },
  WrongType { want: &'static str, got: &'static str },
  MissingArg { name: Str },
  TooManyArgs { want: usize, got: usize },
  NoSuchArg { name: Str },
  Selector { text: String, error: sass_selector::Error },
  ExtendTargetNotSimple { text: String },
  ParentAtTopLevel,
  DeclarationOutsideRule,
  ExtendOutsideRule,
  ContentOutsideMixin,
  ReturnOutsideFunction,
  FunctionNoReturn { name: Str },
  NonIntegerRange,
  DivideByZero,
  MissingExpr,
  User(String),
}

impl Error {
  /// Displays the error against the string arena.
  #[must_use]
  pub fn display<'a>(&'a self, ar: &'a StrArena) -> impl fmt::Display + 'a {
    DisplayError { error: self, ar }
  }
}

struct DisplayError<'a> {
  error: &'a Error,
  ar: &'a StrArena,
}

impl fmt::Display for DisplayError<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let ar = self.ar;
    match &self.error.kind {
      Kind::UnitMismatch { lhs, rhs } => {
        let lhs = or_unitless(lhs.as_str(ar));
        let rhs = or_unitless(rhs.as_str(ar));
        write!(f, "incompatible units: {lhs} and {rhs}")
      }
      Kind::UndefinedName { name, what } => {
        write!(f, "undefined {}: `{}`", what.desc(), ar.get(*name))
      }
      Kind::Index { index, len } => {
        write!(f, "index {index} out of bounds for length {len} (indices are 1-based)")
      }
      Kind::ExtendNotFound { target } => {
        write!(f, "`@extend {target}` matched no selector; use `!optional` to allow this")
      }
      Kind::IncompatibleTypes { op, lhs, rhs } => {
        write!(f, "cannot apply `{op}` to {lhs} and {rhs}")
      }
      Kind::WrongType { want, got } => write!(f, "expected a {want}, got a {got}"),
      Kind::MissingArg { name } => write!(f, "missing argument `${}`", ar.get(*name)),
      Kind::TooManyArgs { want, got } => {
        write!(f, "too many arguments: expected at most {want}, got {got}")
      }
      Kind::NoSuchArg { name } => write!(f, "no argument named `${}`", ar.get(*name)),
      Kind::Selector { text, error } => write!(f, "invalid selector `{text}`: {error}"),
      Kind::ExtendTargetNotSimple { text } => {
        write!(f, "`@extend` target must be a single simple selector, got `{text}`")
      }
      Kind::ParentAtTopLevel => f.write_str("`&` used outside of any parent rule"),
      Kind::DeclarationOutsideRule => f.write_str("declaration outside of any rule"),
      Kind::ExtendOutsideRule => f.write_str("`@extend` outside of any rule"),
      Kind::ContentOutsideMixin => f.write_str("`@content` outside of any mixin"),
      Kind::ReturnOutsideFunction => f.write_str("`@return` outside of any function"),
      Kind::FunctionNoReturn { name } => {
        write!(f, "function `{}` finished without `@return`", ar.get(*name))
      }
      Kind::NonIntegerRange => f.write_str("`@for` bounds must be integers"),
      Kind::DivideByZero => f.write_str("division by zero"),
      Kind::MissingExpr => f.write_str("missing expression"),
      Kind::User(msg) => write!(f, "error: {msg}"),
    }
  }
}

fn or_unitless(s: &str) -> &str {
  if s.is_empty() { "no units" } else { s }
}
