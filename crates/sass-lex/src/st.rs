//! The state of the lexer.

use drop_bomb::DebugDropBomb;

#[derive(Debug, Default)]
pub(crate) struct St<'a> {
  s: &'a str,
  idx: usize,
}

impl<'a> St<'a> {
  pub(crate) fn new(s: &'a str) -> St<'a> {
    St { s, idx: 0 }
  }

  pub(crate) fn bump(&mut self) {
    self.idx += 1;
  }

  pub(crate) fn cur(&self) -> Option<u8> {
    self.s.as_bytes().get(self.idx).copied()
  }

  pub(crate) fn peek(&self, n: usize) -> Option<u8> {
    self.s.as_bytes().get(self.idx + n).copied()
  }

  pub(crate) fn cur_idx(&self) -> usize {
    self.idx
  }

  pub(crate) fn bump_while<F>(&mut self, f: F)
  where
    F: Fn(u8) -> bool,
  {
    while let Some(b) = self.cur() {
      if f(b) {
        self.bump();
      } else {
        break;
      }
    }
  }

  pub(crate) fn mark(&self) -> Marker {
    Marker { bomb: DebugDropBomb::new("must be passed to a `St` method"), idx: self.idx }
  }

  pub(crate) fn non_empty_since(&self, m: Marker) -> &'a str {
    let start = m.idx;
    assert!(self.did_bump_since(m));
    &self.s[start..self.idx]
  }

  pub(crate) fn did_bump_since(&self, mut m: Marker) -> bool {
    m.bomb.defuse();
    self.idx > m.idx
  }

  pub(crate) fn eat_prefix(&mut self, prefix: &[u8]) -> bool {
    let end = self.idx + prefix.len();
    if self.s.as_bytes().get(self.idx..end).is_some_and(|bs| bs == prefix) {
      self.idx = end;
      true
    } else {
      false
    }
  }

  /// Advances past the current char, however many bytes it is.
  pub(crate) fn next_str(&mut self) {
    self.bump();
    loop {
      if self.s.is_char_boundary(self.idx) {
        break;
      }
      match self.cur() {
        Some(_) => self.bump(),
        None => unreachable!("got to the end without a valid str"),
      }
    }
  }
}

pub(crate) struct Marker {
  bomb: DebugDropBomb,
  idx: usize,
}
