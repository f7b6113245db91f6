//! Rendering selectors back to text.

use crate::{Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector};
use std::fmt;

impl fmt::Display for SimpleSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SimpleSelector::Universal => f.write_str("*"),
      SimpleSelector::Type(name) => f.write_str(name),
      SimpleSelector::Class(name) => write!(f, ".{name}"),
      SimpleSelector::Id(name) => write!(f, "#{name}"),
      SimpleSelector::Placeholder(name) => write!(f, "%{name}"),
      SimpleSelector::Attribute(raw) => f.write_str(raw),
      SimpleSelector::PseudoClass { name, arg } => match arg {
        None => write!(f, ":{name}"),
        Some(arg) => write!(f, ":{name}({arg})"),
      },
      SimpleSelector::PseudoElement(name) => write!(f, "::{name}"),
      SimpleSelector::Parent => f.write_str("&"),
    }
  }
}

impl fmt::Display for CompoundSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_compound(f, self)
  }
}

impl fmt::Display for ComplexSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write(f, false)
  }
}

impl fmt::Display for SelectorList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.write(f, false)
  }
}

impl ComplexSelector {
  /// Writes the selector, spacing combinators unless `compressed`.
  ///
  /// # Errors
  ///
  /// Propagates the formatter's errors.
  pub fn write(&self, f: &mut impl fmt::Write, compressed: bool) -> fmt::Result {
    let mut wrote_any = false;
    if !self.first.simples.is_empty() {
      write_compound(f, &self.first)?;
      wrote_any = true;
    }
    for (comb, compound) in &self.rest {
      match comb {
        Combinator::Descendant => {
          if wrote_any {
            f.write_char(' ')?;
          }
        }
        Combinator::Child => write_comb(f, '>', wrote_any, compressed)?,
        Combinator::NextSibling => write_comb(f, '+', wrote_any, compressed)?,
        Combinator::Following => write_comb(f, '~', wrote_any, compressed)?,
      }
      write_compound(f, compound)?;
      wrote_any = true;
    }
    Ok(())
  }
}

impl SelectorList {
  /// Writes the list, comma-separating complex selectors.
  ///
  /// # Errors
  ///
  /// Propagates the formatter's errors.
  pub fn write(&self, f: &mut impl fmt::Write, compressed: bool) -> fmt::Result {
    let mut first = true;
    for complex in &self.complexes {
      if !first {
        f.write_str(if compressed { "," } else { ", " })?;
      }
      first = false;
      complex.write(f, compressed)?;
    }
    Ok(())
  }
}

fn write_compound(f: &mut impl fmt::Write, compound: &CompoundSelector) -> fmt::Result {
  for simple in &compound.simples {
    write!(f, "{simple}")?;
  }
  Ok(())
}

fn write_comb(f: &mut impl fmt::Write, c: char, spaced: bool, compressed: bool) -> fmt::Result {
  if compressed {
    f.write_char(c)
  } else if spaced {
    write!(f, " {c} ")
  } else {
    write!(f, "{c} ")
  }
}
