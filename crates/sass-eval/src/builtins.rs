//! The builtin function registry, implemented in Rust.
//!
//! The registry is a fixed table consulted only after user definitions; it
//! never changes at runtime.

use crate::Cx;
use crate::error::{Kind, Result};
use crate::exec::{CallArgs, err};
use sass_ast::{ExprMust, ListSep};
use sass_val::{Color, List, Map, Number, Unit, Val};

/// Calls the named builtin, or `None` if no builtin has this name.
#[expect(clippy::too_many_lines)]
pub(crate) fn call(
  cx: &mut Cx<'_>,
  e: ExprMust,
  name: &str,
  args: &CallArgs,
) -> Option<Result<Val>> {
  let ret = match name {
    // color constructors and channels
    "rgb" => rgb(cx, e, args, 1.0),
    "rgba" => rgba(cx, e, args),
    "red" => channel(cx, e, args, |c| c.r),
    "green" => channel(cx, e, args, |c| c.g),
    "blue" => channel(cx, e, args, |c| c.b),
    "alpha" | "opacity" => {
      arg(cx, e, args, 0, "color").and_then(|v| color(e, v)).map(|c| {
        Val::Number(Number::unitless(c.a))
      })
    }
    "mix" => mix(cx, e, args),
    "lighten" => hsl_adjust(cx, e, args, |l, amt| l + amt),
    "darken" => hsl_adjust(cx, e, args, |l, amt| l - amt),
    "saturate" => hsl_sat(cx, e, args, |s, amt| s + amt),
    "desaturate" => hsl_sat(cx, e, args, |s, amt| s - amt),
    "grayscale" => one_color(cx, e, args, |c| {
      let (h, _, l) = c.to_hsl();
      Color::from_hsl(h, 0.0, l, c.a)
    }),
    "invert" => one_color(cx, e, args, |c| c.map_channels(|ch| 255.0 - ch)),
    "opacify" | "fade-in" => alpha_adjust(cx, e, args, |a, amt| a + amt),
    "transparentize" | "fade-out" => alpha_adjust(cx, e, args, |a, amt| a - amt),
    // strings
    "quote" => arg(cx, e, args, 0, "string").map(|v| match v {
      Val::String { val, .. } => Val::String { val: *val, quoted: true },
      other => {
        let text = other.display(cx.strings, cx.fmt).to_string();
        let val = cx.strings.str(&text);
        Val::String { val, quoted: true }
      }
    }),
    "unquote" => arg(cx, e, args, 0, "string").map(|v| match v {
      Val::String { val, .. } => Val::String { val: *val, quoted: false },
      other => other.clone(),
    }),
    "str-length" => {
      string_arg(cx, e, args, 0, "string").map(|s| {
        let n = cx.strings.get(s).chars().count();
        #[expect(clippy::cast_precision_loss)]
        Val::Number(Number::unitless(n as f64))
      })
    }
    "str-index" => str_index(cx, e, args),
    "str-insert" => str_insert(cx, e, args),
    "str-slice" => str_slice(cx, e, args),
    "to-upper-case" => case(cx, e, args, str::to_uppercase),
    "to-lower-case" => case(cx, e, args, str::to_lowercase),
    // lists
    "length" => arg(cx, e, args, 0, "list").map(|v| {
      let n = match v {
        Val::List(l) => l.elems.len(),
        Val::Map(m) => m.len(),
        _ => 1,
      };
      #[expect(clippy::cast_precision_loss)]
      Val::Number(Number::unitless(n as f64))
    }),
    "nth" => nth(cx, e, args),
    "join" => join(cx, e, args),
    "append" => append(cx, e, args),
    "index" => index_fn(cx, e, args),
    "zip" => zip(args),
    "list-separator" => arg(cx, e, args, 0, "list").map(|v| {
      let sep = match v.separator() {
        ListSep::Comma => "comma",
        ListSep::Space => "space",
      };
      Val::ident(cx.strings, sep)
    }),
    // maps
    "map-get" => {
      two_args(cx, e, args, "map", "key").and_then(|(m, k)| {
        let m = map(e, m)?;
        Ok(m.get(k).cloned().unwrap_or(Val::Null))
      })
    }
    "map-has-key" => {
      two_args(cx, e, args, "map", "key").and_then(|(m, k)| {
        let m = map(e, m)?;
        Ok(Val::Bool(m.get(k).is_some()))
      })
    }
    "map-merge" => {
      two_args(cx, e, args, "map1", "map2").and_then(|(a, b)| {
        let mut a = map(e, a)?.clone();
        for (k, v) in map(e, b)?.entries() {
          a.insert(k.clone(), v.clone());
        }
        Ok(Val::Map(a))
      })
    }
    "map-remove" => {
      arg(cx, e, args, 0, "map").and_then(|m| {
        let mut m = map(e, m)?.clone();
        for k in args.positional.iter().skip(1) {
          m.remove(k);
        }
        Ok(Val::Map(m))
      })
    }
    "map-keys" => arg(cx, e, args, 0, "map").and_then(|m| {
      let m = map(e, m)?;
      Ok(Val::List(List {
        elems: m.entries().iter().map(|(k, _)| k.clone()).collect(),
        sep: ListSep::Comma,
        bracketed: false,
      }))
    }),
    "map-values" => arg(cx, e, args, 0, "map").and_then(|m| {
      let m = map(e, m)?;
      Ok(Val::List(List {
        elems: m.entries().iter().map(|(_, v)| v.clone()).collect(),
        sep: ListSep::Comma,
        bracketed: false,
      }))
    }),
    // math
    "abs" => one_number(cx, e, args, f64::abs),
    "ceil" => one_number(cx, e, args, f64::ceil),
    "floor" => one_number(cx, e, args, f64::floor),
    "round" => one_number(cx, e, args, f64::round),
    "min" => min_max(e, args, true),
    "max" => min_max(e, args, false),
    "percentage" => {
      arg(cx, e, args, 0, "number").and_then(|v| number(e, v)).and_then(|n| {
        if n.unit == Unit::None {
          Ok(Val::Number(Number::new(n.value * 100.0, Unit::Percent)))
        } else {
          Err(err(e, Kind::WrongType { want: "unitless number", got: "number with units" }))
        }
      })
    }
    "unit" => arg(cx, e, args, 0, "number").and_then(|v| number(e, v)).map(|n| {
      let text = n.unit.as_str(cx.strings).to_owned();
      let val = cx.strings.str(&text);
      Val::String { val, quoted: true }
    }),
    "unitless" => {
      arg(cx, e, args, 0, "number")
        .and_then(|v| number(e, v))
        .map(|n| Val::Bool(n.unit == Unit::None))
    }
    "comparable" => {
      two_args(cx, e, args, "number1", "number2").and_then(|(a, b)| {
        let a = number(e, a)?;
        let b = number(e, b)?;
        Ok(Val::Bool(a.unit.compatible(b.unit)))
      })
    }
    // introspection
    "type-of" => arg(cx, e, args, 0, "value").map(|v| {
      let name = v.type_name();
      Val::ident(cx.strings, name)
    }),
    "inspect" => arg(cx, e, args, 0, "value").map(|v| {
      let text = v.inspect(cx.strings, cx.fmt).to_string();
      Val::ident(cx.strings, &text)
    }),
    "if" => {
      arg(cx, e, args, 0, "condition").map(|cond| {
        let pick = if cond.truthy() { 1 } else { 2 };
        args.positional.get(pick).cloned().unwrap_or(Val::Null)
      })
    }
    _ => return None,
  };
  Some(ret)
}

fn arg<'v>(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &'v CallArgs,
  i: usize,
  name: &str,
) -> Result<&'v Val> {
  if let Some(v) = args.positional.get(i) {
    return Ok(v);
  }
  for (n, v) in &args.named {
    if cx.strings.get(*n) == name {
      return Ok(v);
    }
  }
  let name = cx.strings.str(name);
  Err(err(e, Kind::MissingArg { name }))
}

fn opt_arg<'v>(cx: &Cx<'_>, args: &'v CallArgs, i: usize, name: &str) -> Option<&'v Val> {
  if let Some(v) = args.positional.get(i) {
    return Some(v);
  }
  args.named.iter().find_map(|(n, v)| (cx.strings.get(*n) == name).then_some(v))
}

fn two_args<'v>(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &'v CallArgs,
  a: &str,
  b: &str,
) -> Result<(&'v Val, &'v Val)> {
  let x = arg(cx, e, args, 0, a)?;
  let y = arg(cx, e, args, 1, b)?;
  Ok((x, y))
}

fn number(e: ExprMust, v: &Val) -> Result<Number> {
  match v {
    Val::Number(n) => Ok(*n),
    other => Err(err(e, Kind::WrongType { want: "number", got: other.type_name() })),
  }
}

fn color(e: ExprMust, v: &Val) -> Result<Color> {
  match v {
    Val::Color(c) => Ok(*c),
    other => Err(err(e, Kind::WrongType { want: "color", got: other.type_name() })),
  }
}

fn map(e: ExprMust, v: &Val) -> Result<&Map> {
  match v {
    Val::Map(m) => Ok(m),
    // the empty list doubles as the empty map
    Val::List(l) if l.elems.is_empty() => Ok(&EMPTY_MAP),
    other => Err(err(e, Kind::WrongType { want: "map", got: other.type_name() })),
  }
}

static EMPTY_MAP: Map = Map::empty();

fn string_arg(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  i: usize,
  name: &str,
) -> Result<sass_ast::Str> {
  let v = arg(cx, e, args, i, name)?;
  match v {
    Val::String { val, .. } => Ok(*val),
    other => Err(err(e, Kind::WrongType { want: "string", got: other.type_name() })),
  }
}

fn rgb(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs, a: f64) -> Result<Val> {
  let r = number(e, arg(cx, e, args, 0, "red")?)?;
  let g = number(e, arg(cx, e, args, 1, "green")?)?;
  let b = number(e, arg(cx, e, args, 2, "blue")?)?;
  Ok(Val::Color(Color::new(
    channel_value(r),
    channel_value(g),
    channel_value(b),
    a,
  )))
}

/// Percent channels scale to 0–255.
fn channel_value(n: Number) -> f64 {
  if n.unit == Unit::Percent { n.value / 100.0 * 255.0 } else { n.value }
}

fn rgba(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  // rgba($color, $alpha) or rgba($r, $g, $b, $a)
  if args.positional.len() == 2 {
    let c = color(e, &args.positional[0])?;
    let a = number(e, &args.positional[1])?;
    return Ok(Val::Color(c.with_alpha(a.value)));
  }
  let a = number(e, arg(cx, e, args, 3, "alpha")?)?;
  rgb(cx, e, args, a.value)
}

fn channel(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(Color) -> f64,
) -> Result<Val> {
  let c = color(e, arg(cx, e, args, 0, "color")?)?;
  Ok(Val::Number(Number::unitless(f(c).round())))
}

fn one_color(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(Color) -> Color,
) -> Result<Val> {
  let c = color(e, arg(cx, e, args, 0, "color")?)?;
  Ok(Val::Color(f(c)))
}

fn amount(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<f64> {
  let n = number(e, arg(cx, e, args, 1, "amount")?)?;
  Ok(n.value / 100.0)
}

fn hsl_adjust(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(f64, f64) -> f64,
) -> Result<Val> {
  let c = color(e, arg(cx, e, args, 0, "color")?)?;
  let amt = amount(cx, e, args)?;
  let (h, s, l) = c.to_hsl();
  Ok(Val::Color(Color::from_hsl(h, s, f(l, amt).clamp(0.0, 1.0), c.a)))
}

fn hsl_sat(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(f64, f64) -> f64,
) -> Result<Val> {
  let c = color(e, arg(cx, e, args, 0, "color")?)?;
  let amt = amount(cx, e, args)?;
  let (h, s, l) = c.to_hsl();
  Ok(Val::Color(Color::from_hsl(h, f(s, amt).clamp(0.0, 1.0), l, c.a)))
}

fn alpha_adjust(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(f64, f64) -> f64,
) -> Result<Val> {
  let c = color(e, arg(cx, e, args, 0, "color")?)?;
  let amt = amount(cx, e, args)?;
  Ok(Val::Color(c.with_alpha(f(c.a, amt))))
}

fn mix(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let a = color(e, arg(cx, e, args, 0, "color1")?)?;
  let b = color(e, arg(cx, e, args, 1, "color2")?)?;
  let weight = match opt_arg(cx, args, 2, "weight") {
    Some(v) => number(e, v)?.value / 100.0,
    None => 0.5,
  };
  let w = weight.clamp(0.0, 1.0);
  let blend = |x: f64, y: f64| x * w + y * (1.0 - w);
  Ok(Val::Color(Color::new(
    blend(a.r, b.r),
    blend(a.g, b.g),
    blend(a.b, b.b),
    blend(a.a, b.a),
  )))
}

fn one_number(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(f64) -> f64,
) -> Result<Val> {
  let n = number(e, arg(cx, e, args, 0, "number")?)?;
  Ok(Val::Number(Number::new(f(n.value), n.unit)))
}

fn min_max(e: ExprMust, args: &CallArgs, want_min: bool) -> Result<Val> {
  let mut best: Option<Number> = None;
  for v in &args.positional {
    let n = number(e, v)?;
    best = Some(match best {
      None => n,
      Some(b) => {
        let Some(ord) = n.cmp_values(b) else {
          return Err(err(e, Kind::UnitMismatch { lhs: n.unit, rhs: b.unit }));
        };
        if ord.is_lt() == want_min { n } else { b }
      }
    });
  }
  match best {
    Some(n) => Ok(Val::Number(n)),
    None => Err(err(e, Kind::WrongType { want: "number", got: "nothing" })),
  }
}

fn list_index(e: ExprMust, n: Number, len: usize) -> Result<usize> {
  let Some(i) = n.as_int() else {
    return Err(err(e, Kind::Index { index: n.value, len }));
  };
  // 1-based; zero, negative, and past-the-end are all out of bounds
  if i < 1 || usize::try_from(i).is_ok_and(|i| i > len) {
    #[expect(clippy::cast_precision_loss)]
    return Err(err(e, Kind::Index { index: i as f64, len }));
  }
  Ok(usize::try_from(i).expect("checked positive") - 1)
}

fn nth(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let (list, n) = two_args(cx, e, args, "list", "n")?;
  let n = number(e, n)?;
  let items = list.clone().into_items();
  let i = list_index(e, n, items.len())?;
  Ok(items[i].clone())
}

fn index_fn(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let (list, value) = two_args(cx, e, args, "list", "value")?;
  let items = list.clone().into_items();
  match items.iter().position(|v| v == value) {
    #[expect(clippy::cast_precision_loss)]
    Some(i) => Ok(Val::Number(Number::unitless((i + 1) as f64))),
    None => Ok(Val::Null),
  }
}

fn sep_from_arg(cx: &Cx<'_>, args: &CallArgs, i: usize, fallback: ListSep) -> ListSep {
  match opt_arg(cx, args, i, "separator") {
    Some(Val::String { val, .. }) => match cx.strings.get(*val) {
      "comma" => ListSep::Comma,
      "space" => ListSep::Space,
      _ => fallback,
    },
    _ => fallback,
  }
}

fn join(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let (a, b) = two_args(cx, e, args, "list1", "list2")?;
  let sep = sep_from_arg(cx, args, 2, a.separator());
  let mut elems = a.clone().into_items();
  elems.extend(b.clone().into_items());
  Ok(Val::List(List { elems, sep, bracketed: false }))
}

fn append(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let (list, value) = two_args(cx, e, args, "list", "value")?;
  let sep = sep_from_arg(cx, args, 2, list.separator());
  let mut elems = match list.clone() {
    Val::List(l) => l.elems,
    other => vec![other],
  };
  elems.push(value.clone());
  Ok(Val::List(List { elems, sep, bracketed: false }))
}

fn zip(args: &CallArgs) -> Result<Val> {
  let lists: Vec<Vec<Val>> = args.positional.iter().map(|v| v.clone().into_items()).collect();
  let len = lists.iter().map(Vec::len).min().unwrap_or(0);
  let mut elems = Vec::<Val>::with_capacity(len);
  for i in 0..len {
    let row: Vec<Val> = lists.iter().map(|l| l[i].clone()).collect();
    elems.push(Val::List(List { elems: row, sep: ListSep::Space, bracketed: false }));
  }
  Ok(Val::List(List { elems, sep: ListSep::Comma, bracketed: false }))
}

fn str_index(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let s = string_arg(cx, e, args, 0, "string")?;
  let sub = string_arg(cx, e, args, 1, "substring")?;
  let hay = cx.strings.get(s);
  let needle = cx.strings.get(sub);
  match hay.find(needle) {
    Some(byte_idx) => {
      let chars = hay[..byte_idx].chars().count();
      #[expect(clippy::cast_precision_loss)]
      Ok(Val::Number(Number::unitless((chars + 1) as f64)))
    }
    None => Ok(Val::Null),
  }
}

fn str_insert(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let s = string_arg(cx, e, args, 0, "string")?;
  let quoted = matches!(arg(cx, e, args, 0, "string")?, Val::String { quoted: true, .. });
  let insert = string_arg(cx, e, args, 1, "insert")?;
  let n = number(e, arg(cx, e, args, 2, "index")?)?;
  let hay = cx.strings.get(s).to_owned();
  let ins = cx.strings.get(insert).to_owned();
  let len = hay.chars().count();
  let Some(i) = n.as_int() else {
    return Err(err(e, Kind::Index { index: n.value, len }));
  };
  // insertion positions run 1..=len+1
  if i < 1 || usize::try_from(i).is_ok_and(|i| i > len + 1) {
    #[expect(clippy::cast_precision_loss)]
    return Err(err(e, Kind::Index { index: i as f64, len }));
  }
  let at = usize::try_from(i).expect("checked positive") - 1;
  let byte = char_to_byte(&hay, at);
  let mut out = hay;
  out.insert_str(byte, &ins);
  let val = cx.strings.str(&out);
  Ok(Val::String { val, quoted })
}

fn str_slice(cx: &mut Cx<'_>, e: ExprMust, args: &CallArgs) -> Result<Val> {
  let s = string_arg(cx, e, args, 0, "string")?;
  let quoted = matches!(arg(cx, e, args, 0, "string")?, Val::String { quoted: true, .. });
  let start = number(e, arg(cx, e, args, 1, "start-at")?)?;
  let hay = cx.strings.get(s).to_owned();
  let len = hay.chars().count();
  let end = match opt_arg(cx, args, 2, "end-at") {
    Some(v) => number(e, v)?.value,
    None => -1.0,
  };
  let start = resolve_slice_index(e, start.value, len)?;
  let end = resolve_slice_index(e, end, len)?;
  let out: String = if start > end {
    String::new()
  } else {
    hay.chars().skip(start - 1).take(end - start + 1).collect()
  };
  let val = cx.strings.str(&out);
  Ok(Val::String { val, quoted })
}

/// Slice endpoints are 1-based; negative counts from the end.
fn resolve_slice_index(e: ExprMust, v: f64, len: usize) -> Result<usize> {
  #[expect(clippy::cast_precision_loss)]
  let flen = len as f64;
  let resolved = if v < 0.0 { flen + v + 1.0 } else { v };
  if resolved < 1.0 || resolved > flen {
    return Err(err(e, Kind::Index { index: v, len }));
  }
  #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  Ok(resolved as usize)
}

fn char_to_byte(s: &str, chars: usize) -> usize {
  s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

fn case(
  cx: &mut Cx<'_>,
  e: ExprMust,
  args: &CallArgs,
  f: impl Fn(&str) -> String,
) -> Result<Val> {
  let v = arg(cx, e, args, 0, "string")?;
  match v {
    Val::String { val, quoted } => {
      let quoted = *quoted;
      let text = f(cx.strings.get(*val));
      let val = cx.strings.str(&text);
      Ok(Val::String { val, quoted })
    }
    other => Err(err(e, Kind::WrongType { want: "string", got: other.type_name() })),
  }
}

