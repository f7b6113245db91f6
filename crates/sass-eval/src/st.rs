//! Mutable evaluation state threaded through the walk.

use crate::env::Scopes;
use rustc_hash::FxHashSet;
use sass_ast::StmtMust;
use sass_selector::{Extension, SelectorList};
use sass_val::Val;

#[derive(Debug)]
pub(crate) struct St {
  pub(crate) scopes: Scopes,
  /// Resolved ancestor selector frames, innermost last.
  pub(crate) selector_stack: Vec<SelectorList>,
  /// Extensions registered so far, with the statement that registered each.
  pub(crate) extensions: Vec<(Extension, StmtMust)>,
  /// `@content` bodies of the `@include`s currently executing.
  pub(crate) content_stack: Vec<Option<Vec<StmtMust>>>,
  /// Canonical identities whose top-level effects already ran.
  pub(crate) evaluated_imports: FxHashSet<paths::PathId>,
  /// Set while executing a function body, so `@return` resolves.
  pub(crate) function_depth: usize,
  /// The value `@return` produced, if any.
  pub(crate) returned: Option<Val>,
}

impl St {
  pub(crate) fn new() -> Self {
    Self {
      scopes: Scopes::new(),
      selector_stack: Vec::new(),
      extensions: Vec::new(),
      content_stack: Vec::new(),
      evaluated_imports: FxHashSet::default(),
      function_depth: 0,
      returned: None,
    }
  }

  pub(crate) fn current_selectors(&self) -> Option<&SelectorList> {
    self.selector_stack.last()
  }
}
