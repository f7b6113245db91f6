//! Serializing values to CSS text.

use crate::{Color, Val};
use sass_ast::{ListSep, StrArena};
use std::fmt;

/// Output formatting knobs that affect value serialization.
#[derive(Debug, Clone, Copy)]
pub struct Fmt {
  /// Decimal digits kept on numbers.
  pub precision: usize,
  pub compressed: bool,
}

impl Default for Fmt {
  fn default() -> Self {
    Self { precision: 5, compressed: false }
  }
}

impl Val {
  /// Displays the value as CSS text.
  #[must_use]
  pub fn display<'a>(&'a self, ar: &'a StrArena, fmt: Fmt) -> impl fmt::Display + 'a {
    DisplayVal { val: self, ar, fmt }
  }

  /// Displays the value the way `inspect()` and `@debug` do: like CSS, but
  /// maps and quoting stay visible.
  #[must_use]
  pub fn inspect<'a>(&'a self, ar: &'a StrArena, fmt: Fmt) -> impl fmt::Display + 'a {
    InspectVal { val: self, ar, fmt }
  }
}

struct DisplayVal<'a> {
  val: &'a Val,
  ar: &'a StrArena,
  fmt: Fmt,
}

impl fmt::Display for DisplayVal<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_val(f, self.val, self.ar, self.fmt)
  }
}

struct InspectVal<'a> {
  val: &'a Val,
  ar: &'a StrArena,
  fmt: Fmt,
}

impl fmt::Display for InspectVal<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_inspect(f, self.val, self.ar, self.fmt)
  }
}

fn write_val(f: &mut fmt::Formatter<'_>, val: &Val, ar: &StrArena, fmt: Fmt) -> fmt::Result {
  match val {
    // null disappears in css position
    Val::Null => Ok(()),
    Val::Bool(b) => write!(f, "{b}"),
    Val::Number(n) => {
      f.write_str(&fmt_number(n.value, fmt))?;
      f.write_str(n.unit.as_str(ar))
    }
    Val::Color(c) => write_color(f, *c, fmt),
    Val::String { val, quoted } => {
      if *quoted {
        write!(f, "\"{}\"", ar.get(*val))
      } else {
        f.write_str(ar.get(*val))
      }
    }
    Val::List(list) => {
      if list.bracketed {
        f.write_str("[")?;
      }
      let mut first = true;
      for elem in &list.elems {
        if matches!(elem, Val::Null) {
          continue;
        }
        if !first {
          f.write_str(sep_str(list.sep, fmt))?;
        }
        first = false;
        write_val(f, elem, ar, fmt)?;
      }
      if list.bracketed {
        f.write_str("]")?;
      }
      Ok(())
    }
    Val::Map(_) => write_inspect(f, val, ar, fmt),
  }
}

fn write_inspect(f: &mut fmt::Formatter<'_>, val: &Val, ar: &StrArena, fmt: Fmt) -> fmt::Result {
  match val {
    Val::Null => f.write_str("null"),
    Val::Map(map) => {
      f.write_str("(")?;
      let mut first = true;
      for (k, v) in map.entries() {
        if !first {
          f.write_str(", ")?;
        }
        first = false;
        write_inspect(f, k, ar, fmt)?;
        f.write_str(": ")?;
        write_inspect(f, v, ar, fmt)?;
      }
      f.write_str(")")
    }
    Val::List(list) => {
      let wrap = list.elems.len() <= 1 && !list.bracketed;
      if wrap {
        f.write_str("(")?;
      }
      let mut first = true;
      for elem in &list.elems {
        if !first {
          f.write_str(sep_str(list.sep, Fmt { compressed: false, ..fmt }))?;
        }
        first = false;
        write_inspect(f, elem, ar, fmt)?;
      }
      if list.elems.len() == 1 && list.sep == ListSep::Comma {
        f.write_str(",")?;
      }
      if wrap {
        f.write_str(")")?;
      }
      Ok(())
    }
    _ => write_val(f, val, ar, fmt),
  }
}

fn sep_str(sep: ListSep, fmt: Fmt) -> &'static str {
  match sep {
    ListSep::Space => " ",
    ListSep::Comma => {
      if fmt.compressed {
        ","
      } else {
        ", "
      }
    }
  }
}

fn write_color(f: &mut fmt::Formatter<'_>, c: Color, fmt: Fmt) -> fmt::Result {
  let r = channel(c.r);
  let g = channel(c.g);
  let b = channel(c.b);
  if (c.a - 1.0).abs() < 1e-9 {
    if fmt.compressed && r % 17 == 0 && g % 17 == 0 && b % 17 == 0 {
      return write!(f, "#{:x}{:x}{:x}", r / 17, g / 17, b / 17);
    }
    return write!(f, "#{r:02x}{g:02x}{b:02x}");
  }
  let a = fmt_number(c.a, fmt);
  if fmt.compressed {
    write!(f, "rgba({r},{g},{b},{a})")
  } else {
    write!(f, "rgba({r}, {g}, {b}, {a})")
  }
}

fn channel(v: f64) -> u8 {
  #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  let ret = v.round().clamp(0.0, 255.0) as u8;
  ret
}

/// Formats a number to at most `fmt.precision` decimal digits, trimming
/// trailing zeros and normalizing `-0`.
#[must_use]
pub fn fmt_number(value: f64, fmt: Fmt) -> String {
  #[expect(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
  let mult = 10f64.powi(fmt.precision as i32);
  let mut rounded = (value * mult).round() / mult;
  if rounded == 0.0 {
    rounded = 0.0;
  }
  let mut ret = if rounded.fract() == 0.0 {
    #[expect(clippy::cast_possible_truncation)]
    let int = rounded as i64;
    int.to_string()
  } else {
    format!("{rounded}")
  };
  if fmt.compressed && ret.starts_with("0.") {
    ret.remove(0);
  } else if fmt.compressed && ret.starts_with("-0.") {
    ret.remove(1);
  }
  ret
}
