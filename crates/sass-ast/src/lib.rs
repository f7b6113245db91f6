//! Arena-allocated syntax trees for Sass stylesheets.
//!
//! Nodes live in per-compilation arenas and are referred to by index. Side
//! tables map every node back to its originating file and source span for
//! diagnostics; the nodes themselves stay small.

mod string;

pub use string::{Str, StrArena};

use text_size::TextRange;

/// An expression that must exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprMust(la_arena::Idx<ExprData>);

/// An expression that may be missing, from a parse error.
pub type Expr = Option<ExprMust>;

#[derive(Debug, Default)]
pub struct ExprArena(la_arena::Arena<ExprData>);

impl std::ops::Index<ExprMust> for ExprArena {
  type Output = ExprData;

  fn index(&self, index: ExprMust) -> &Self::Output {
    &self.0[index.0]
  }
}

impl ExprArena {
  pub fn alloc(&mut self, data: ExprData) -> ExprMust {
    ExprMust(self.0.alloc(data))
  }
}

#[derive(Debug)]
pub struct ExprMap<T>(la_arena::ArenaMap<la_arena::Idx<ExprData>, T>);

impl<T> Default for ExprMap<T> {
  fn default() -> Self {
    Self(la_arena::ArenaMap::default())
  }
}

impl<T> ExprMap<T> {
  pub fn insert(&mut self, key: ExprMust, val: T) {
    self.0.insert(key.0, val);
  }

  #[must_use]
  pub fn get(&self, key: ExprMust) -> Option<&T> {
    self.0.get(key.0)
  }
}

/// A statement that must exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StmtMust(la_arena::Idx<StmtData>);

#[derive(Debug, Default)]
pub struct StmtArena(la_arena::Arena<StmtData>);

impl std::ops::Index<StmtMust> for StmtArena {
  type Output = StmtData;

  fn index(&self, index: StmtMust) -> &Self::Output {
    &self.0[index.0]
  }
}

impl StmtArena {
  pub fn alloc(&mut self, data: StmtData) -> StmtMust {
    StmtMust(self.0.alloc(data))
  }
}

#[derive(Debug)]
pub struct StmtMap<T>(la_arena::ArenaMap<la_arena::Idx<StmtData>, T>);

impl<T> Default for StmtMap<T> {
  fn default() -> Self {
    Self(la_arena::ArenaMap::default())
  }
}

impl<T> StmtMap<T> {
  pub fn insert(&mut self, key: StmtMust, val: T) {
    self.0.insert(key.0, val);
  }

  #[must_use]
  pub fn get(&self, key: StmtMust) -> Option<&T> {
    self.0.get(key.0)
  }
}

/// Where a node came from.
#[derive(Debug, Clone, Copy)]
pub struct Source {
  pub file: paths::PathId,
  pub range: TextRange,
}

/// The arenas for one compilation. Every file parsed for the compilation
/// allocates into the same arenas, so node indices are compilation-global.
#[derive(Debug, Default)]
pub struct Arenas {
  pub strings: StrArena,
  pub exprs: ExprArena,
  pub stmts: StmtArena,
}

/// Side tables from nodes back to their sources.
#[derive(Debug, Default)]
pub struct Pointers {
  pub exprs: ExprMap<Source>,
  pub stmts: StmtMap<Source>,
}

/// A raw template: literal text interleaved with `#{}` interpolations. Used
/// for everything resolved after evaluation, like selector preludes and
/// property names.
#[derive(Debug, Clone, Default)]
pub struct Template {
  pub parts: Vec<TemplatePart>,
}

#[derive(Debug, Clone)]
pub enum TemplatePart {
  Lit(Str),
  Expr(Expr),
}

/// Formal parameters of a mixin or function.
#[derive(Debug, Clone, Default)]
pub struct Params {
  pub params: Vec<Param>,
}

/// One formal parameter. A `None` default means the parameter is required.
#[derive(Debug, Clone)]
pub struct Param {
  pub name: Str,
  pub default: Expr,
}

/// Actual arguments of a mixin or function invocation.
#[derive(Debug, Clone, Default)]
pub struct Args {
  pub positional: Vec<Expr>,
  pub named: Vec<(Str, Expr)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSep {
  Space,
  Comma,
}

#[derive(Debug, Clone, Copy)]
pub enum UnaryOp {
  Neg,
  Pos,
  Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
  Eq,
  NotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  And,
  Or,
}

#[derive(Debug, Clone)]
pub enum ExprData {
  Null,
  Bool(bool),
  /// The unit is the raw unit text, empty for unitless numbers.
  Number { value: f64, unit: Str },
  String { value: Str, quoted: bool },
  /// A hex color literal.
  Color { r: u8, g: u8, b: u8 },
  Variable(Str),
  List { elems: Vec<Expr>, sep: ListSep, bracketed: bool },
  Map { entries: Vec<(Expr, Expr)> },
  Paren(Expr),
  UnaryOp { op: UnaryOp, inner: Expr },
  BinaryOp { lhs: Expr, op: BinaryOp, rhs: Expr },
  Call { name: Str, args: Args },
  /// A `#{}` interpolation in value position.
  Interpolation(Expr),
}

#[derive(Debug, Clone)]
pub struct IfBranch {
  pub cond: Expr,
  pub body: Vec<StmtMust>,
}

#[derive(Debug, Clone)]
pub enum StmtData {
  /// A style rule: raw selector template plus nested body.
  RuleBlock { prelude: Template, body: Vec<StmtMust> },
  Declaration { name: Template, value: Expr, important: bool },
  VariableAssign { name: Str, value: Expr, global: bool, default: bool },
  MixinDef { name: Str, params: Params, body: Vec<StmtMust> },
  FunctionDef { name: Str, params: Params, body: Vec<StmtMust> },
  Include { name: Str, args: Args, content: Option<Vec<StmtMust>> },
  Content,
  Return(Expr),
  If { branches: Vec<IfBranch>, else_body: Option<Vec<StmtMust>> },
  Each { names: Vec<Str>, over: Expr, body: Vec<StmtMust> },
  For { var: Str, from: Expr, to: Expr, inclusive: bool, body: Vec<StmtMust> },
  While { cond: Expr, body: Vec<StmtMust> },
  /// A Sass import to be resolved by the import machinery.
  Import { path: Str },
  /// A plain-CSS import passed through to the output untouched.
  CssImport { text: Template },
  Extend { target: Template, optional: bool },
  /// Any other at-rule, like `@media`. A `None` body means no block.
  AtRule { name: Str, params: Template, body: Option<Vec<StmtMust>> },
  Warn(Expr),
  Debug(Expr),
  Error(Expr),
  LoudComment(Str),
}

#[test]
fn expr_size() {
  assert!(std::mem::size_of::<ExprData>() <= 64);
}
