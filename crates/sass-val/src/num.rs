//! Numbers with units.

use sass_ast::{Str, StrArena};

/// A CSS unit. Units within a family convert to one another; everything else
/// only combines with itself or a unitless operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  None,
  Px,
  Cm,
  Mm,
  Q,
  In,
  Pt,
  Pc,
  Em,
  Rem,
  Ex,
  Ch,
  Vw,
  Vh,
  Vmin,
  Vmax,
  Fr,
  Percent,
  Deg,
  Grad,
  Rad,
  Turn,
  S,
  Ms,
  Hz,
  Khz,
  Dpi,
  Dpcm,
  Dppx,
  Other(Str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
  AbsoluteLength,
  Angle,
  Time,
  Frequency,
  Resolution,
}

impl Unit {
  /// Parses raw unit text; empty text is unitless.
  pub fn parse(text: &str, ar: &mut StrArena) -> Unit {
    match text {
      "" => Unit::None,
      "px" => Unit::Px,
      "cm" => Unit::Cm,
      "mm" => Unit::Mm,
      "q" | "Q" => Unit::Q,
      "in" => Unit::In,
      "pt" => Unit::Pt,
      "pc" => Unit::Pc,
      "em" => Unit::Em,
      "rem" => Unit::Rem,
      "ex" => Unit::Ex,
      "ch" => Unit::Ch,
      "vw" => Unit::Vw,
      "vh" => Unit::Vh,
      "vmin" => Unit::Vmin,
      "vmax" => Unit::Vmax,
      "fr" => Unit::Fr,
      "%" => Unit::Percent,
      "deg" => Unit::Deg,
      "grad" => Unit::Grad,
      "rad" => Unit::Rad,
      "turn" => Unit::Turn,
      "s" => Unit::S,
      "ms" => Unit::Ms,
      "hz" | "Hz" => Unit::Hz,
      "khz" | "kHz" => Unit::Khz,
      "dpi" => Unit::Dpi,
      "dpcm" => Unit::Dpcm,
      "dppx" => Unit::Dppx,
      _ => Unit::Other(ar.str(text)),
    }
  }

  /// The unit's text. Empty for unitless.
  #[must_use]
  pub fn as_str(self, ar: &StrArena) -> &str {
    match self {
      Unit::None => "",
      Unit::Px => "px",
      Unit::Cm => "cm",
      Unit::Mm => "mm",
      Unit::Q => "q",
      Unit::In => "in",
      Unit::Pt => "pt",
      Unit::Pc => "pc",
      Unit::Em => "em",
      Unit::Rem => "rem",
      Unit::Ex => "ex",
      Unit::Ch => "ch",
      Unit::Vw => "vw",
      Unit::Vh => "vh",
      Unit::Vmin => "vmin",
      Unit::Vmax => "vmax",
      Unit::Fr => "fr",
      Unit::Percent => "%",
      Unit::Deg => "deg",
      Unit::Grad => "grad",
      Unit::Rad => "rad",
      Unit::Turn => "turn",
      Unit::S => "s",
      Unit::Ms => "ms",
      Unit::Hz => "hz",
      Unit::Khz => "khz",
      Unit::Dpi => "dpi",
      Unit::Dpcm => "dpcm",
      Unit::Dppx => "dppx",
      Unit::Other(s) => ar.get(s),
    }
  }

  fn family(self) -> Option<Family> {
    match self {
      Unit::Px | Unit::Cm | Unit::Mm | Unit::Q | Unit::In | Unit::Pt | Unit::Pc => {
        Some(Family::AbsoluteLength)
      }
      Unit::Deg | Unit::Grad | Unit::Rad | Unit::Turn => Some(Family::Angle),
      Unit::S | Unit::Ms => Some(Family::Time),
      Unit::Hz | Unit::Khz => Some(Family::Frequency),
      Unit::Dpi | Unit::Dpcm | Unit::Dppx => Some(Family::Resolution),
      _ => None,
    }
  }

  /// Conversion factor to the family's canonical unit.
  fn factor(self) -> f64 {
    match self {
      Unit::Cm => 96.0 / 2.54,
      Unit::Mm => 96.0 / 25.4,
      Unit::Q => 96.0 / 101.6,
      Unit::In => 96.0,
      Unit::Pt => 96.0 / 72.0,
      Unit::Pc => 16.0,
      Unit::Grad => 0.9,
      Unit::Rad => 180.0 / std::f64::consts::PI,
      Unit::Turn => 360.0,
      Unit::Ms => 0.001,
      Unit::Khz => 1000.0,
      Unit::Dpcm => 2.54,
      Unit::Dppx => 96.0,
      _ => 1.0,
    }
  }

  /// Whether quantities in these units may combine.
  #[must_use]
  pub fn compatible(self, other: Unit) -> bool {
    self == other
      || self == Unit::None
      || other == Unit::None
      || (self.family().is_some() && self.family() == other.family())
  }
}

/// A number with a unit.
#[derive(Debug, Clone, Copy)]
pub struct Number {
  pub value: f64,
  pub unit: Unit,
}

impl Number {
  #[must_use]
  pub fn new(value: f64, unit: Unit) -> Self {
    Self { value, unit }
  }

  #[must_use]
  pub fn unitless(value: f64) -> Self {
    Self { value, unit: Unit::None }
  }

  /// Converts to the given unit, or `None` if incompatible. Unitless numbers
  /// take on whatever unit is asked of them.
  #[must_use]
  pub fn coerce(self, unit: Unit) -> Option<Number> {
    if self.unit == unit || self.unit == Unit::None {
      return Some(Number::new(self.value, unit));
    }
    if unit == Unit::None {
      return Some(self);
    }
    if self.unit.family().is_some() && self.unit.family() == unit.family() {
      let value = self.value * self.unit.factor() / unit.factor();
      return Some(Number::new(value, unit));
    }
    None
  }

  #[must_use]
  pub fn add(self, other: Number) -> Option<Number> {
    let other = other.coerce(self.result_unit(other))?;
    let this = self.coerce(other.unit)?;
    Some(Number::new(this.value + other.value, this.unit))
  }

  #[must_use]
  pub fn sub(self, other: Number) -> Option<Number> {
    let other = other.coerce(self.result_unit(other))?;
    let this = self.coerce(other.unit)?;
    Some(Number::new(this.value - other.value, this.unit))
  }

  /// Multiplication requires at least one unitless side.
  #[must_use]
  pub fn mul(self, other: Number) -> Option<Number> {
    match (self.unit, other.unit) {
      (_, Unit::None) => Some(Number::new(self.value * other.value, self.unit)),
      (Unit::None, u) => Some(Number::new(self.value * other.value, u)),
      _ => None,
    }
  }

  /// Division cancels equal units and keeps the unit over a unitless divisor.
  #[must_use]
  pub fn div(self, other: Number) -> Option<Number> {
    if other.unit == Unit::None {
      return Some(Number::new(self.value / other.value, self.unit));
    }
    let this = self.coerce(other.unit)?;
    Some(Number::unitless(this.value / other.value))
  }

  #[must_use]
  pub fn rem(self, other: Number) -> Option<Number> {
    let other = other.coerce(self.result_unit(other))?;
    let this = self.coerce(other.unit)?;
    Some(Number::new(this.value % other.value, this.unit))
  }

  /// Compares after unit coercion.
  #[must_use]
  pub fn cmp_values(self, other: Number) -> Option<std::cmp::Ordering> {
    let other = other.coerce(self.result_unit(other))?;
    let this = self.coerce(other.unit)?;
    this.value.partial_cmp(&other.value)
  }

  /// The unit a combination of the two should carry.
  fn result_unit(self, other: Number) -> Unit {
    if self.unit == Unit::None { other.unit } else { self.unit }
  }

  /// Whether this is close enough to an integer to be treated as one.
  #[must_use]
  pub fn as_int(self) -> Option<i64> {
    let rounded = self.value.round();
    if (self.value - rounded).abs() < 1e-9 {
      #[expect(clippy::cast_possible_truncation)]
      Some(rounded as i64)
    } else {
      None
    }
  }
}

impl PartialEq for Number {
  fn eq(&self, other: &Self) -> bool {
    self.cmp_values(*other) == Some(std::cmp::Ordering::Equal)
  }
}
