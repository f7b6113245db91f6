//! The lexical environment: a stack of scopes.
//!
//! Lookup walks innermost-first. `!global` writes the root scope; a plain
//! assignment updates the nearest scope that already binds the name, and
//! otherwise defines in the current scope.

use rustc_hash::FxHashMap;
use sass_ast::{Params, StmtMust, Str};
use sass_val::Val;

#[derive(Debug, Clone)]
pub(crate) struct MixinDecl {
  pub(crate) name: Str,
  pub(crate) params: Params,
  pub(crate) body: Vec<StmtMust>,
}

#[derive(Debug, Clone)]
pub(crate) struct FnDecl {
  pub(crate) name: Str,
  pub(crate) params: Params,
  pub(crate) body: Vec<StmtMust>,
}

#[derive(Debug, Default)]
struct Scope {
  vars: FxHashMap<Str, Val>,
  mixins: FxHashMap<Str, MixinDecl>,
  fns: FxHashMap<Str, FnDecl>,
}

#[derive(Debug)]
pub(crate) struct Scopes {
  stack: Vec<Scope>,
}

impl Scopes {
  pub(crate) fn new() -> Self {
    Self { stack: vec![Scope::default()] }
  }

  pub(crate) fn push(&mut self) {
    self.stack.push(Scope::default());
  }

  pub(crate) fn pop(&mut self) {
    assert!(self.stack.len() > 1, "cannot pop the root scope");
    self.stack.pop();
  }

  /// Defines in the current scope unconditionally, shadowing any outer
  /// binding. Used for parameters and loop variables.
  pub(crate) fn define_var(&mut self, name: Str, val: Val) {
    let last = self.stack.len() - 1;
    self.stack[last].vars.insert(name, val);
  }

  pub(crate) fn get_var(&self, name: Str) -> Option<&Val> {
    self.stack.iter().rev().find_map(|s| s.vars.get(&name))
  }

  pub(crate) fn set_var(&mut self, name: Str, val: Val, global: bool, default: bool) {
    if default {
      // `!default` only takes effect when the name is unset or null
      match self.get_var(name) {
        None | Some(Val::Null) => {}
        Some(_) => return,
      }
    }
    if global {
      self.stack[0].vars.insert(name, val);
      return;
    }
    for scope in self.stack.iter_mut().rev() {
      if let Some(slot) = scope.vars.get_mut(&name) {
        *slot = val;
        return;
      }
    }
    let last = self.stack.len() - 1;
    self.stack[last].vars.insert(name, val);
  }

  pub(crate) fn define_mixin(&mut self, decl: MixinDecl) {
    let last = self.stack.len() - 1;
    self.stack[last].mixins.insert(decl.name, decl);
  }

  pub(crate) fn get_mixin(&self, name: Str) -> Option<&MixinDecl> {
    self.stack.iter().rev().find_map(|s| s.mixins.get(&name))
  }

  pub(crate) fn define_fn(&mut self, decl: FnDecl) {
    let last = self.stack.len() - 1;
    self.stack[last].fns.insert(decl.name, decl);
  }

  pub(crate) fn get_fn(&self, name: Str) -> Option<&FnDecl> {
    self.stack.iter().rev().find_map(|s| s.fns.get(&name))
  }
}
