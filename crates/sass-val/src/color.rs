//! RGBA colors.

/// An RGBA color. Channels are stored 0–255, alpha 0–1; arithmetic clamps.
#[derive(Debug, Clone, Copy)]
pub struct Color {
  pub r: f64,
  pub g: f64,
  pub b: f64,
  pub a: f64,
}

impl Color {
  #[must_use]
  pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
    Self { r: clamp_channel(r), g: clamp_channel(g), b: clamp_channel(b), a: clamp_alpha(a) }
  }

  #[must_use]
  pub fn opaque(r: f64, g: f64, b: f64) -> Self {
    Self::new(r, g, b, 1.0)
  }

  /// Applies `f` channel-wise to both colors, clamping. Alpha comes from the
  /// left color.
  #[must_use]
  pub fn channel_wise(self, other: Color, f: impl Fn(f64, f64) -> f64) -> Color {
    Color::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b), self.a)
  }

  /// Applies `f` to each channel with a scalar, clamping.
  #[must_use]
  pub fn map_channels(self, f: impl Fn(f64) -> f64) -> Color {
    Color::new(f(self.r), f(self.g), f(self.b), self.a)
  }

  #[must_use]
  pub fn with_alpha(self, a: f64) -> Color {
    Color { a: clamp_alpha(a), ..self }
  }

  /// Hue in degrees 0–360, saturation and lightness 0–1.
  #[must_use]
  pub fn to_hsl(self) -> (f64, f64, f64) {
    let r = self.r / 255.0;
    let g = self.g / 255.0;
    let b = self.b / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if (max - min).abs() < f64::EPSILON {
      return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if (max - r).abs() < f64::EPSILON {
      (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
      (b - r) / d + 2.0
    } else {
      (r - g) / d + 4.0
    };
    (h * 60.0, s, l)
  }

  /// Builds from hue in degrees, saturation and lightness 0–1.
  #[must_use]
  pub fn from_hsl(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
      let v = l * 255.0;
      return Color::new(v, v, v, a);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);
    Color::new(r * 255.0, g * 255.0, b * 255.0, a)
  }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
  if t < 0.0 {
    t += 1.0;
  }
  if t > 1.0 {
    t -= 1.0;
  }
  if t < 1.0 / 6.0 {
    p + (q - p) * 6.0 * t
  } else if t < 1.0 / 2.0 {
    q
  } else if t < 2.0 / 3.0 {
    p + (q - p) * (2.0 / 3.0 - t) * 6.0
  } else {
    p
  }
}

fn clamp_channel(v: f64) -> f64 {
  v.clamp(0.0, 255.0)
}

fn clamp_alpha(v: f64) -> f64 {
  v.clamp(0.0, 1.0)
}

impl PartialEq for Color {
  fn eq(&self, other: &Self) -> bool {
    rounded(self.r) == rounded(other.r)
      && rounded(self.g) == rounded(other.g)
      && rounded(self.b) == rounded(other.b)
      && (self.a - other.a).abs() < 1e-9
  }
}

fn rounded(v: f64) -> i64 {
  #[expect(clippy::cast_possible_truncation)]
  let r = v.round() as i64;
  r
}
