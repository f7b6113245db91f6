//! Interned strings.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// An interned string: an index into a [`StrArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Str(u32);

impl Str {
  fn from_usize(n: usize) -> Self {
    Self(u32::try_from(n).expect("number of distinct strings should fit in u32"))
  }

  fn to_usize(self) -> usize {
    usize::try_from(self.0).expect("u32 should fit in usize")
  }
}

/// The arena of interned strings.
#[derive(Debug, Default)]
pub struct StrArena {
  idx_to_data: Vec<Box<str>>,
  data_to_idx: FxHashMap<Box<str>, Str>,
}

impl StrArena {
  /// Interns the contents if they were not interned already.
  pub fn str(&mut self, contents: &str) -> Str {
    match self.data_to_idx.entry(contents.into()) {
      Entry::Occupied(entry) => *entry.get(),
      Entry::Vacant(entry) => {
        let ret = Str::from_usize(self.idx_to_data.len());
        self.idx_to_data.push(entry.key().clone());
        entry.insert(ret);
        ret
      }
    }
  }

  /// Gets the contents.
  #[must_use]
  pub fn get(&self, s: Str) -> &str {
    &self.idx_to_data[s.to_usize()]
  }
}
