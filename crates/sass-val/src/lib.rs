//! Runtime values and the flat-rule output model.
//!
//! Values are immutable: operations construct new values. Strings intern into
//! the compilation's [`StrArena`], so value equality on strings is id
//! equality.

mod color;
mod display;
mod flat;
mod num;

pub use color::Color;
pub use display::{Fmt, fmt_number};
pub use flat::{FlatDecl, FlatItem, FlatRule, RuleSource};
pub use num::{Number, Unit};

use sass_ast::{ListSep, Str, StrArena};

/// A Sass value.
#[derive(Debug, Clone)]
pub enum Val {
  Null,
  Bool(bool),
  Number(Number),
  Color(Color),
  String { val: Str, quoted: bool },
  List(List),
  Map(Map),
}

/// A list value. The separator is part of the list's identity.
#[derive(Debug, Clone)]
pub struct List {
  pub elems: Vec<Val>,
  pub sep: ListSep,
  pub bracketed: bool,
}

/// A map value: keys unique, insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct Map {
  entries: Vec<(Val, Val)>,
}

impl Map {
  /// The empty map, usable in constant position.
  #[must_use]
  pub const fn empty() -> Self {
    Self { entries: Vec::new() }
  }

  #[must_use]
  pub fn new(entries: Vec<(Val, Val)>) -> Self {
    let mut ret = Self::default();
    for (k, v) in entries {
      ret.insert(k, v);
    }
    ret
  }

  #[must_use]
  pub fn get(&self, key: &Val) -> Option<&Val> {
    self.entries.iter().find_map(|(k, v)| (k == key).then_some(v))
  }

  /// Inserts, replacing in place if the key exists, appending otherwise.
  pub fn insert(&mut self, key: Val, val: Val) {
    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some((_, v)) => *v = val,
      None => self.entries.push((key, val)),
    }
  }

  pub fn remove(&mut self, key: &Val) {
    self.entries.retain(|(k, _)| k != key);
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[must_use]
  pub fn entries(&self) -> &[(Val, Val)] {
    &self.entries
  }
}

impl Val {
  /// Everything is truthy except `false` and `null`.
  #[must_use]
  pub fn truthy(&self) -> bool {
    !matches!(self, Val::Null | Val::Bool(false))
  }

  #[must_use]
  pub fn type_name(&self) -> &'static str {
    match self {
      Val::Null => "null",
      Val::Bool(_) => "bool",
      Val::Number(_) => "number",
      Val::Color(_) => "color",
      Val::String { .. } => "string",
      Val::List(_) => "list",
      Val::Map(_) => "map",
    }
  }

  /// The elements iterated by `@each` and the list functions: a list's
  /// elements, a map's `(key value)` pairs, anything else as a singleton.
  #[must_use]
  pub fn into_items(self) -> Vec<Val> {
    match self {
      Val::List(list) => list.elems,
      Val::Map(map) => map
        .entries
        .into_iter()
        .map(|(k, v)| {
          Val::List(List { elems: vec![k, v], sep: ListSep::Space, bracketed: false })
        })
        .collect(),
      other => vec![other],
    }
  }

  #[must_use]
  pub fn separator(&self) -> ListSep {
    match self {
      Val::List(list) => list.sep,
      Val::Map(_) => ListSep::Comma,
      _ => ListSep::Space,
    }
  }

  #[must_use]
  pub fn string(val: Str, quoted: bool) -> Self {
    Val::String { val, quoted }
  }

  /// Unquoted string from arbitrary text.
  pub fn ident(ar: &mut StrArena, text: &str) -> Self {
    Val::String { val: ar.str(text), quoted: false }
  }
}

impl PartialEq for Val {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Val::Null, Val::Null) => true,
      (Val::Bool(a), Val::Bool(b)) => a == b,
      (Val::Number(a), Val::Number(b)) => a == b,
      (Val::Color(a), Val::Color(b)) => a == b,
      // quoting does not take part in string identity
      (Val::String { val: a, .. }, Val::String { val: b, .. }) => a == b,
      (Val::List(a), Val::List(b)) => {
        a.sep == b.sep && a.bracketed == b.bracketed && a.elems == b.elems
      }
      // maps compare as key-value sets
      (Val::Map(a), Val::Map(b)) => {
        a.len() == b.len() && a.entries.iter().all(|(k, v)| b.get(k) == Some(v))
      }
      _ => false,
    }
  }
}
