//! The dynamic semantics: evaluating a parsed stylesheet to flat rules.
//!
//! One call to [`get`] runs one compilation's evaluation pass: expressions
//! resolve against the environment chain, control flow unrolls, selectors
//! expand against their ancestor frames, and `@extend` resolves in a second
//! pass over the finished rules. Import contents must already be parsed; the
//! walk only splices them.

pub mod error;

mod builtins;
mod env;
mod exec;
mod flatten;
mod st;

use rustc_hash::FxHashMap;
use sass_ast::{ExprArena, Pointers, StmtArena, StmtMust, StrArena};
use sass_val::{FlatItem, Fmt};

/// Everything evaluation borrows from the compilation.
#[derive(Debug)]
pub struct Cx<'a> {
  pub strings: &'a mut StrArena,
  pub exprs: &'a ExprArena,
  pub stmts: &'a StmtArena,
  pub ptrs: &'a Pointers,
  /// Parsed files by canonical identity.
  pub files: &'a paths::PathMap<File>,
  /// Resolved targets for each `@import` directive.
  pub import_targets: &'a FxHashMap<StmtMust, Vec<paths::PathId>>,
  /// Position databases, for source comments.
  pub pos_dbs: &'a paths::PathMap<text_pos::PositionDb>,
  pub fmt: Fmt,
}

/// One parsed file.
#[derive(Debug)]
pub struct File {
  pub top: Vec<StmtMust>,
}

/// Evaluates the root file's statements to flat output items.
///
/// # Errors
///
/// If evaluation failed.
pub fn get(cx: &mut Cx<'_>, top: &[StmtMust]) -> error::Result<Vec<FlatItem>> {
  let mut st = st::St::new();
  let mut out = Vec::<FlatItem>::new();
  {
    let mut sink = flatten::Sink { decls: None, out: &mut out };
    flatten::walk(cx, &mut st, top, &mut sink)?;
  }
  flatten::finish(&st, &mut out)?;
  Ok(out)
}
