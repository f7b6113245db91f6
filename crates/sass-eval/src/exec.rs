//! Executing expressions to produce values.

use crate::error::{At, Error, Kind, NameKind, Result};
use crate::st::St;
use crate::{Cx, builtins, flatten};
use sass_ast::{Args, BinaryOp, Expr, ExprData, ExprMust, UnaryOp};
use sass_val::{Color, List, Map, Number, Unit, Val};

pub(crate) fn err(at: ExprMust, kind: Kind) -> Error {
  Error { at: At::Expr(at), kind }
}

/// Executes the expression to produce a value.
pub(crate) fn get(cx: &mut Cx<'_>, st: &mut St, expr: Expr) -> Result<Val> {
  let Some(e) = expr else {
    // a missing sub-expression always has a parse error alongside it
    return Ok(Val::Null);
  };
  let data = cx.exprs[e].clone();
  match data {
    ExprData::Null => Ok(Val::Null),
    ExprData::Bool(b) => Ok(Val::Bool(b)),
    ExprData::Number { value, unit } => {
      let text = cx.strings.get(unit).to_owned();
      let unit = Unit::parse(&text, cx.strings);
      Ok(Val::Number(Number::new(value, unit)))
    }
    ExprData::String { value, quoted } => Ok(Val::String { val: value, quoted }),
    ExprData::Color { r, g, b } => {
      Ok(Val::Color(Color::opaque(f64::from(r), f64::from(g), f64::from(b))))
    }
    ExprData::Variable(name) => match st.scopes.get_var(name) {
      Some(v) => Ok(v.clone()),
      None => Err(err(e, Kind::UndefinedName { name, what: NameKind::Variable })),
    },
    ExprData::List { elems, sep, bracketed } => {
      let elems: Vec<Val> =
        elems.into_iter().map(|elem| get(cx, st, elem)).collect::<Result<_>>()?;
      Ok(Val::List(List { elems, sep, bracketed }))
    }
    ExprData::Map { entries } => {
      let mut map = Map::default();
      for (k, v) in entries {
        let k = get(cx, st, k)?;
        let v = get(cx, st, v)?;
        map.insert(k, v);
      }
      Ok(Val::Map(map))
    }
    ExprData::Paren(inner) => get(cx, st, inner),
    ExprData::Interpolation(inner) => {
      let val = get(cx, st, inner)?;
      let text = interpolated_text(cx, &val);
      Ok(Val::ident(cx.strings, &text))
    }
    ExprData::UnaryOp { op, inner } => {
      let at = inner.unwrap_or(e);
      let val = get(cx, st, inner)?;
      match op {
        UnaryOp::Not => Ok(Val::Bool(!val.truthy())),
        UnaryOp::Neg => match val {
          Val::Number(n) => Ok(Val::Number(Number::new(-n.value, n.unit))),
          other => {
            // `-foo` over a non-number is css text
            let text = format!("-{}", interpolated_text(cx, &other));
            Ok(Val::ident(cx.strings, &text))
          }
        },
        UnaryOp::Pos => match val {
          Val::Number(n) => Ok(Val::Number(n)),
          other => Err(err(at, Kind::WrongType { want: "number", got: other.type_name() })),
        },
      }
    }
    ExprData::BinaryOp { lhs, op, rhs } => binary_op(cx, st, e, lhs, op, rhs),
    ExprData::Call { name, args } => call(cx, st, e, name, &args),
  }
}

fn binary_op(
  cx: &mut Cx<'_>,
  st: &mut St,
  e: ExprMust,
  lhs: Expr,
  op: BinaryOp,
  rhs: Expr,
) -> Result<Val> {
  // `and`/`or` short-circuit and return the deciding operand
  if let BinaryOp::And | BinaryOp::Or = op {
    let l = get(cx, st, lhs)?;
    let keep_left = match op {
      BinaryOp::And => !l.truthy(),
      _ => l.truthy(),
    };
    return if keep_left { Ok(l) } else { get(cx, st, rhs) };
  }
  let l = get(cx, st, lhs)?;
  let r = get(cx, st, rhs)?;
  match op {
    BinaryOp::Eq => Ok(Val::Bool(l == r)),
    BinaryOp::NotEq => Ok(Val::Bool(l != r)),
    BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
      let (Val::Number(a), Val::Number(b)) = (&l, &r) else {
        return Err(err(e, Kind::IncompatibleTypes {
          op: cmp_op_str(op),
          lhs: l.type_name(),
          rhs: r.type_name(),
        }));
      };
      let Some(ord) = a.cmp_values(*b) else {
        return Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit }));
      };
      let ok = match op {
        BinaryOp::Lt => ord.is_lt(),
        BinaryOp::LtEq => ord.is_le(),
        BinaryOp::Gt => ord.is_gt(),
        _ => ord.is_ge(),
      };
      Ok(Val::Bool(ok))
    }
    BinaryOp::Add => add(cx, e, l, r),
    BinaryOp::Sub => sub(cx, e, l, r),
    BinaryOp::Mul => match (&l, &r) {
      (Val::Number(a), Val::Number(b)) => match a.mul(*b) {
        Some(n) => Ok(Val::Number(n)),
        None => Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit })),
      },
      (Val::Color(c), Val::Number(n)) | (Val::Number(n), Val::Color(c)) => {
        let k = n.value;
        Ok(Val::Color(c.map_channels(|ch| ch * k)))
      }
      _ => Err(err(e, Kind::IncompatibleTypes {
        op: "*",
        lhs: l.type_name(),
        rhs: r.type_name(),
      })),
    },
    BinaryOp::Div => div(cx, e, l, r),
    BinaryOp::Mod => match (&l, &r) {
      (Val::Number(a), Val::Number(b)) => {
        if b.value == 0.0 {
          return Err(err(e, Kind::DivideByZero));
        }
        match a.rem(*b) {
          Some(n) => Ok(Val::Number(n)),
          None => Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit })),
        }
      }
      _ => Err(err(e, Kind::IncompatibleTypes {
        op: "%",
        lhs: l.type_name(),
        rhs: r.type_name(),
      })),
    },
    BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
  }
}

fn cmp_op_str(op: BinaryOp) -> &'static str {
  match op {
    BinaryOp::Lt => "<",
    BinaryOp::LtEq => "<=",
    BinaryOp::Gt => ">",
    _ => ">=",
  }
}

fn add(cx: &mut Cx<'_>, e: ExprMust, l: Val, r: Val) -> Result<Val> {
  match (&l, &r) {
    (Val::Number(a), Val::Number(b)) => match a.add(*b) {
      Some(n) => Ok(Val::Number(n)),
      None => Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit })),
    },
    (Val::Color(a), Val::Color(b)) => Ok(Val::Color(a.channel_wise(*b, |x, y| x + y))),
    (Val::Color(c), Val::Number(n)) | (Val::Number(n), Val::Color(c)) => {
      let k = n.value;
      Ok(Val::Color(c.map_channels(|ch| ch + k)))
    }
    // string concatenation keeps the left operand's quoting; a bare value
    // plus a string takes the string's quoting
    (Val::String { val, quoted }, _) => {
      let text = format!("{}{}", cx.strings.get(*val), interpolated_text(cx, &r));
      let val = cx.strings.str(&text);
      Ok(Val::String { val, quoted: *quoted })
    }
    (_, Val::String { val, quoted }) => {
      let text = format!("{}{}", interpolated_text(cx, &l), cx.strings.get(*val));
      let val = cx.strings.str(&text);
      Ok(Val::String { val, quoted: *quoted })
    }
    _ => {
      let text = format!("{}{}", interpolated_text(cx, &l), interpolated_text(cx, &r));
      Ok(Val::ident(cx.strings, &text))
    }
  }
}

fn sub(cx: &mut Cx<'_>, e: ExprMust, l: Val, r: Val) -> Result<Val> {
  match (&l, &r) {
    (Val::Number(a), Val::Number(b)) => match a.sub(*b) {
      Some(n) => Ok(Val::Number(n)),
      None => Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit })),
    },
    (Val::Color(a), Val::Color(b)) => Ok(Val::Color(a.channel_wise(*b, |x, y| x - y))),
    (Val::Color(c), Val::Number(n)) => {
      let k = n.value;
      Ok(Val::Color(c.map_channels(|ch| ch - k)))
    }
    _ => {
      let text = format!("{}-{}", interpolated_text(cx, &l), interpolated_text(cx, &r));
      Ok(Val::ident(cx.strings, &text))
    }
  }
}

fn div(cx: &mut Cx<'_>, e: ExprMust, l: Val, r: Val) -> Result<Val> {
  match (&l, &r) {
    (Val::Number(a), Val::Number(b)) => {
      if b.value == 0.0 {
        return Err(err(e, Kind::DivideByZero));
      }
      match a.div(*b) {
        Some(n) => Ok(Val::Number(n)),
        None => Err(err(e, Kind::UnitMismatch { lhs: a.unit, rhs: b.unit })),
      }
    }
    _ => {
      let text = format!("{}/{}", interpolated_text(cx, &l), interpolated_text(cx, &r));
      Ok(Val::ident(cx.strings, &text))
    }
  }
}

/// Text of a value inside interpolation: like CSS serialization, except
/// quoted strings lose their quotes.
pub(crate) fn interpolated_text(cx: &Cx<'_>, val: &Val) -> String {
  match val {
    Val::String { val, .. } => cx.strings.get(*val).to_owned(),
    other => other.display(cx.strings, cx.fmt).to_string(),
  }
}

/// Evaluated call arguments.
pub(crate) struct CallArgs {
  pub(crate) positional: Vec<Val>,
  pub(crate) named: Vec<(sass_ast::Str, Val)>,
}

pub(crate) fn eval_args(cx: &mut Cx<'_>, st: &mut St, args: &Args) -> Result<CallArgs> {
  let mut positional = Vec::<Val>::with_capacity(args.positional.len());
  for &a in &args.positional {
    positional.push(get(cx, st, a)?);
  }
  let mut named = Vec::<(sass_ast::Str, Val)>::with_capacity(args.named.len());
  for &(name, a) in &args.named {
    named.push((name, get(cx, st, a)?));
  }
  Ok(CallArgs { positional, named })
}

fn call(
  cx: &mut Cx<'_>,
  st: &mut St,
  e: ExprMust,
  name: sass_ast::Str,
  args: &Args,
) -> Result<Val> {
  // user definitions shadow builtins
  if let Some(decl) = st.scopes.get_fn(name) {
    let decl = decl.clone();
    return flatten::call_function(cx, st, e, &decl, args);
  }
  let evaled = eval_args(cx, st, args)?;
  let name_text = cx.strings.get(name).to_owned();
  if let Some(ret) = builtins::call(cx, e, &name_text, &evaled) {
    return ret;
  }
  // unknown functions pass through as css
  let mut text = format!("{name_text}(");
  let mut first = true;
  for v in &evaled.positional {
    if !first {
      text.push_str(", ");
    }
    first = false;
    text.push_str(&v.display(cx.strings, cx.fmt).to_string());
  }
  for (n, v) in &evaled.named {
    if !first {
      text.push_str(", ");
    }
    first = false;
    let n = cx.strings.get(*n).to_owned();
    text.push_str(&format!("${n}: {}", v.display(cx.strings, cx.fmt)));
  }
  text.push(')');
  Ok(Val::ident(cx.strings, &text))
}
