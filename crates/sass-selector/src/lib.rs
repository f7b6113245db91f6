//! Selectors: the data model, parsing from resolved template text, nesting
//! expansion against ancestor selectors, and `@extend` resolution.
//!
//! Selector text reaches this crate only after `#{}` interpolation has been
//! resolved, so parsing here is over plain strings.

mod display;
mod extend;
mod parse;

pub use extend::{Extension, extend_list};
pub use parse::{Error, parse};

/// One simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
  /// `*`
  Universal,
  /// `a`
  Type(String),
  /// `.a`
  Class(String),
  /// `#a`
  Id(String),
  /// `%a`, participates in nesting and extend but never reaches output.
  Placeholder(String),
  /// `[...]`, kept raw.
  Attribute(String),
  /// `:name` or `:name(...)`.
  PseudoClass { name: String, arg: Option<String> },
  /// `::name`
  PseudoElement(String),
  /// `&`
  Parent,
}

/// A compound selector: simple selectors with no combinators between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
  pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
  #[must_use]
  pub fn has_parent(&self) -> bool {
    self.simples.iter().any(|s| matches!(s, SimpleSelector::Parent))
  }

  #[must_use]
  pub fn has_placeholder(&self) -> bool {
    self.simples.iter().any(|s| matches!(s, SimpleSelector::Placeholder(_)))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
  Descendant,
  /// `>`
  Child,
  /// `+`
  NextSibling,
  /// `~`
  Following,
}

/// A complex selector: compounds joined by combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
  pub first: CompoundSelector,
  pub rest: Vec<(Combinator, CompoundSelector)>,
}

impl ComplexSelector {
  #[must_use]
  pub fn compounds(&self) -> impl Iterator<Item = &CompoundSelector> {
    std::iter::once(&self.first).chain(self.rest.iter().map(|(_, c)| c))
  }

  #[must_use]
  pub fn has_parent(&self) -> bool {
    self.compounds().any(CompoundSelector::has_parent)
  }

  #[must_use]
  pub fn has_placeholder(&self) -> bool {
    self.compounds().any(CompoundSelector::has_placeholder)
  }

  fn last_compound(&self) -> &CompoundSelector {
    self.rest.last().map_or(&self.first, |(_, c)| c)
  }
}

/// A comma-separated selector list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorList {
  pub complexes: Vec<ComplexSelector>,
}

impl SelectorList {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.complexes.is_empty()
  }

  /// Drops complex selectors that still mention a placeholder.
  pub fn drop_placeholders(&mut self) {
    self.complexes.retain(|c| !c.has_placeholder());
  }
}

/// An error from resolving nesting.
#[derive(Debug, Clone, Copy)]
pub struct ParentAtTopLevel;

impl std::fmt::Display for ParentAtTopLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("`&` used outside of any parent rule")
  }
}

/// Expands a parsed selector template against the ancestor selector.
///
/// Each complex selector either substitutes `&` with each ancestor complex,
/// or is descendant-joined onto each ancestor when it mentions no `&`.
///
/// # Errors
///
/// If `&` appears with no ancestor.
pub fn resolve_nested(
  list: &SelectorList,
  parent: Option<&SelectorList>,
) -> Result<SelectorList, ParentAtTopLevel> {
  let mut ret = SelectorList::default();
  for complex in &list.complexes {
    match parent {
      None => {
        if complex.has_parent() {
          return Err(ParentAtTopLevel);
        }
        ret.complexes.push(complex.clone());
      }
      Some(parent) => {
        for par in &parent.complexes {
          ret.complexes.push(if complex.has_parent() {
            substitute_parent(complex, par)
          } else {
            descend(par, complex)
          });
        }
      }
    }
  }
  Ok(ret)
}

fn descend(parent: &ComplexSelector, child: &ComplexSelector) -> ComplexSelector {
  let mut ret = parent.clone();
  if child.first.simples.is_empty() {
    // leading combinator, like `> b`
    ret.rest.extend(child.rest.iter().cloned());
  } else {
    ret.rest.push((Combinator::Descendant, child.first.clone()));
    ret.rest.extend(child.rest.iter().cloned());
  }
  ret
}

/// Replaces each `&` in the complex with the parent selector. The parent's
/// leading compounds splice in before the compound containing `&`, and its
/// last compound merges with that compound's other simples.
fn substitute_parent(complex: &ComplexSelector, parent: &ComplexSelector) -> ComplexSelector {
  let mut out: Vec<(Combinator, CompoundSelector)> = Vec::new();
  for (idx, compound) in complex.compounds().enumerate() {
    let comb = if idx == 0 {
      Combinator::Descendant
    } else {
      complex.rest[idx - 1].0
    };
    if compound.has_parent() {
      let mut merged = parent.last_compound().clone();
      for s in &compound.simples {
        if !matches!(s, SimpleSelector::Parent) {
          merged.simples.push(s.clone());
        }
      }
      out.push((comb, parent.first.clone()));
      let n = out.len();
      for (c, comp) in &parent.rest {
        out.push((*c, comp.clone()));
      }
      // the spliced-in last compound is the merged one
      if parent.rest.is_empty() {
        out[n - 1].1 = merged;
      } else {
        let last = out.len() - 1;
        out[last].1 = merged;
      }
    } else {
      out.push((comb, compound.clone()));
    }
  }
  let (first, rest) = split_first(out);
  ComplexSelector { first, rest }
}

fn split_first(
  mut parts: Vec<(Combinator, CompoundSelector)>,
) -> (CompoundSelector, Vec<(Combinator, CompoundSelector)>) {
  if parts.is_empty() {
    return (CompoundSelector::default(), Vec::new());
  }
  let first = parts.remove(0).1;
  (first, parts)
}

#[cfg(test)]
mod tests {
  use super::{parse, resolve_nested};

  fn resolved(parent: &str, child: &str) -> String {
    let parent = parse(parent).expect("parse parent");
    let child = parse(child).expect("parse child");
    resolve_nested(&child, Some(&parent)).expect("resolve").to_string()
  }

  #[test]
  fn descendant() {
    assert_eq!("a b", resolved("a", "b"));
  }

  #[test]
  fn parent_suffix() {
    assert_eq!(".a:hover", resolved(".a", "&:hover"));
  }

  #[test]
  fn parent_in_middle() {
    assert_eq!("b .a", resolved(".a", "b &"));
  }

  #[test]
  fn comma_cross_product() {
    assert_eq!("a x, a y, b x, b y", resolved("a, b", "x, y"));
  }

  #[test]
  fn child_combinator() {
    assert_eq!("a > b", resolved("a", "> b"));
  }
}
