//! `@extend` resolution.
//!
//! Extensions collect during flattening and resolve in a second pass over the
//! finished rule list, so resolution order never depends on source order.
//! Resolution substitutes the target simple selector inside each matching
//! compound with every extending selector; full dart-sass weaving is out of
//! scope.

use crate::{ComplexSelector, CompoundSelector, SelectorList, SimpleSelector};

/// One registered `@extend`.
#[derive(Debug, Clone)]
pub struct Extension {
  /// The selector being extended.
  pub target: SimpleSelector,
  /// The selectors of the rule containing the `@extend`.
  pub with: SelectorList,
  /// Whether `!optional` suppresses the no-match error.
  pub optional: bool,
}

/// Applies one extension to one rule's selector list, appending the rewritten
/// selectors. Returns whether the target matched anywhere in the list.
pub fn extend_list(selectors: &mut SelectorList, ext: &Extension) -> bool {
  let mut matched = false;
  let mut added = Vec::<ComplexSelector>::new();
  for complex in &selectors.complexes {
    for (idx, compound) in complex.compounds().enumerate() {
      if !compound.simples.contains(&ext.target) {
        continue;
      }
      matched = true;
      for with in &ext.with.complexes {
        let new = substituted(complex, idx, &ext.target, with);
        if !selectors.complexes.contains(&new) && !added.contains(&new) {
          added.push(new);
        }
      }
    }
  }
  selectors.complexes.extend(added);
  matched
}

/// Rewrites `complex`, replacing `target` inside compound `idx` with the
/// extender. The extender's last compound merges in place; any of its leading
/// compounds splice in front of the rewritten compound.
fn substituted(
  complex: &ComplexSelector,
  idx: usize,
  target: &SimpleSelector,
  with: &ComplexSelector,
) -> ComplexSelector {
  let mut parts: Vec<(crate::Combinator, CompoundSelector)> = Vec::new();
  for (i, compound) in complex.compounds().enumerate() {
    let comb = if i == 0 { crate::Combinator::Descendant } else { complex.rest[i - 1].0 };
    if i == idx {
      let mut merged = CompoundSelector::default();
      let with_last = with.rest.last().map_or(&with.first, |(_, c)| c);
      for s in &compound.simples {
        if s == target {
          merged.simples.extend(with_last.simples.iter().cloned());
        } else {
          merged.simples.push(s.clone());
        }
      }
      if !with.rest.is_empty() {
        parts.push((comb, with.first.clone()));
        for (c, comp) in &with.rest[..with.rest.len() - 1] {
          parts.push((*c, comp.clone()));
        }
        let last_comb = with.rest[with.rest.len() - 1].0;
        parts.push((last_comb, merged));
      } else {
        parts.push((comb, merged));
      }
    } else {
      parts.push((comb, compound.clone()));
    }
  }
  let first = parts.remove(0).1;
  ComplexSelector { first, rest: parts }
}
