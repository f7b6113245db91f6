//! The expression grammar: precedence climbing plus Sass's space- and
//! comma-separated lists.

use crate::{Expected, internal::P, internal::strip_quotes};
use sass_ast::{Args, BinaryOp, Expr, ExprData, ListSep, UnaryOp};
use sass_syntax::kind::SyntaxKind as SK;
use token::Triviable as _;

/// A full expression: a comma-separated list of space lists.
pub(crate) fn expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let first = space_list(p)?;
  if !p.at(SK::Comma) {
    return Some(first);
  }
  let mut elems = vec![Some(first)];
  while p.eat(SK::Comma) {
    if starts_operand(p) {
      elems.push(space_list(p));
    } else {
      break;
    }
  }
  Some(p.expr_node(start, ExprData::List { elems, sep: ListSep::Comma, bracketed: false }))
}

/// A space-separated list of single expressions.
pub(crate) fn space_list(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let first = single(p)?;
  if !starts_operand(p) {
    return Some(first);
  }
  let mut elems = vec![Some(first)];
  while starts_operand(p) {
    elems.push(single(p));
  }
  Some(p.expr_node(start, ExprData::List { elems, sep: ListSep::Space, bracketed: false }))
}

/// A single expression, no space or comma lists at the top level.
pub(crate) fn single(p: &mut P<'_, '_>) -> Expr {
  or_expr(p)
}

fn or_expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut lhs = and_expr(p)?;
  while p.at_ident("or") {
    p.bump();
    let rhs = and_expr(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op: BinaryOp::Or, rhs });
  }
  Some(lhs)
}

fn and_expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut lhs = cmp_expr(p)?;
  while p.at_ident("and") {
    p.bump();
    let rhs = cmp_expr(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op: BinaryOp::And, rhs });
  }
  Some(lhs)
}

fn cmp_expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut lhs = add_expr(p)?;
  loop {
    let op = match p.peek_kind() {
      Some(SK::EqEq) => BinaryOp::Eq,
      Some(SK::BangEq) => BinaryOp::NotEq,
      Some(SK::Lt) => BinaryOp::Lt,
      Some(SK::LtEq) => BinaryOp::LtEq,
      Some(SK::Gt) => BinaryOp::Gt,
      Some(SK::GtEq) => BinaryOp::GtEq,
      _ => break,
    };
    p.bump();
    let rhs = add_expr(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op, rhs });
  }
  Some(lhs)
}

fn add_expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut lhs = mul_expr(p)?;
  loop {
    let op = match p.peek_kind() {
      Some(SK::Plus) => BinaryOp::Add,
      Some(SK::Minus) if minus_is_binary(p) => BinaryOp::Sub,
      _ => break,
    };
    p.bump();
    let rhs = mul_expr(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op, rhs });
  }
  Some(lhs)
}

/// `a - b` and `a-b` subtract; `a -b` is two operands of a space list.
fn minus_is_binary(p: &mut P<'_, '_>) -> bool {
  let i = p.skip_trivia();
  let before = i > 0 && p.raw(i - 1).is_some_and(|t| t.kind.is_trivia());
  let after = p.raw(i + 1).is_some_and(|t| t.kind.is_trivia());
  before == after
}

fn mul_expr(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut lhs = unary(p)?;
  loop {
    let op = match p.peek_kind() {
      Some(SK::Star) => BinaryOp::Mul,
      Some(SK::Slash) => BinaryOp::Div,
      Some(SK::Percent) => BinaryOp::Mod,
      _ => break,
    };
    p.bump();
    let rhs = unary(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op, rhs });
  }
  Some(lhs)
}

fn unary(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  match p.peek_kind() {
    Some(SK::Minus) => {
      p.bump();
      let inner = unary(p);
      Some(p.expr_node(start, ExprData::UnaryOp { op: UnaryOp::Neg, inner }))
    }
    Some(SK::Plus) => {
      p.bump();
      let inner = unary(p);
      Some(p.expr_node(start, ExprData::UnaryOp { op: UnaryOp::Pos, inner }))
    }
    Some(SK::Ident) if p.at_ident("not") => {
      p.bump();
      let inner = unary(p);
      Some(p.expr_node(start, ExprData::UnaryOp { op: UnaryOp::Not, inner }))
    }
    _ => concat_chain(p),
  }
}

/// A primary plus any text glued directly onto it via interpolation, like
/// `#{$i}px` or `abc#{$x}def`. Gluing lowers to string concatenation.
fn concat_chain(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let mut prev_interp = p.at(SK::HashLCurly);
  let mut lhs = primary(p)?;
  loop {
    let Some(t) = p.raw(p.raw_idx()) else { break };
    let next_interp = t.kind == SK::HashLCurly;
    let take = match t.kind {
      SK::HashLCurly => true,
      SK::Ident | SK::Number | SK::String => prev_interp,
      _ => false,
    };
    if !take {
      break;
    }
    let rhs = primary(p);
    lhs = p.expr_node(start, ExprData::BinaryOp { lhs: Some(lhs), op: BinaryOp::Add, rhs });
    prev_interp = next_interp;
  }
  Some(lhs)
}

/// Whether the current token can begin a new operand of a space list.
fn starts_operand(p: &mut P<'_, '_>) -> bool {
  let i = p.skip_trivia();
  let Some(tok) = p.raw(i) else { return false };
  match tok.kind {
    SK::Number
    | SK::String
    | SK::Variable
    | SK::HashIdent
    | SK::HashLCurly
    | SK::LRound
    | SK::LSquare => true,
    SK::Ident => !matches!(tok.text, "and" | "or"),
    // a minus glued to the next token starts a negated operand
    SK::Minus => p.raw(i + 1).is_some_and(|t| !t.kind.is_trivia()),
    _ => false,
  }
}

#[expect(clippy::too_many_lines)]
fn primary(p: &mut P<'_, '_>) -> Expr {
  let start = p.skip_trivia();
  let Some(tok) = p.peek() else {
    p.err(Expected::Expr);
    return None;
  };
  match tok.kind {
    SK::Number => {
      p.bump();
      let value: f64 = tok.text.parse().unwrap_or(0.0);
      let unit = match p.raw(start + 1) {
        Some(t) if t.kind == SK::Ident => {
          p.set_raw_idx(start + 2);
          p.str(t.text)
        }
        Some(t) if t.kind == SK::Percent => {
          p.set_raw_idx(start + 2);
          p.str("%")
        }
        _ => p.str(""),
      };
      Some(p.expr_node(start, ExprData::Number { value, unit }))
    }
    SK::String => {
      p.bump();
      let value = p.str(strip_quotes(tok.text));
      Some(p.expr_node(start, ExprData::String { value, quoted: true }))
    }
    SK::Variable => {
      p.bump();
      let name = p.str(&tok.text[1..]);
      Some(p.expr_node(start, ExprData::Variable(name)))
    }
    SK::HashIdent => {
      p.bump();
      match parse_hex_color(&tok.text[1..]) {
        Some((r, g, b)) => Some(p.expr_node(start, ExprData::Color { r, g, b })),
        None => {
          let value = p.str(tok.text);
          Some(p.expr_node(start, ExprData::String { value, quoted: false }))
        }
      }
    }
    SK::HashLCurly => {
      p.bump();
      let inner = expr(p);
      p.expect(SK::RCurly);
      Some(p.expr_node(start, ExprData::Interpolation(inner)))
    }
    SK::Ident => match tok.text {
      "true" => {
        p.bump();
        Some(p.expr_node(start, ExprData::Bool(true)))
      }
      "false" => {
        p.bump();
        Some(p.expr_node(start, ExprData::Bool(false)))
      }
      "null" => {
        p.bump();
        Some(p.expr_node(start, ExprData::Null))
      }
      _ if is_raw_css_fn(tok.text) && p.raw(start + 1).is_some_and(|t| t.kind == SK::LRound) => {
        raw_call_literal(p, start)
      }
      _ => {
        p.bump();
        if p.raw(start + 1).is_some_and(|t| t.kind == SK::LRound) {
          let name = p.str(tok.text);
          let args = crate::internal::args(p);
          Some(p.expr_node(start, ExprData::Call { name, args }))
        } else {
          let value = p.str(tok.text);
          Some(p.expr_node(start, ExprData::String { value, quoted: false }))
        }
      }
    },
    SK::LRound => paren(p, start),
    SK::LSquare => {
      p.bump();
      let mut elems = Vec::<Expr>::new();
      let mut saw_comma = false;
      while !p.at(SK::RSquare) && starts_operand(p) {
        elems.push(space_list(p));
        if p.eat(SK::Comma) {
          saw_comma = true;
        } else {
          break;
        }
      }
      p.expect(SK::RSquare);
      let sep = if saw_comma || elems.len() <= 1 { ListSep::Comma } else { ListSep::Space };
      Some(p.expr_node(start, ExprData::List { elems, sep, bracketed: true }))
    }
    _ => {
      p.err(Expected::Expr);
      None
    }
  }
}

/// CSS functions whose arguments are not Sass expressions; they are kept
/// verbatim rather than evaluated.
fn is_raw_css_fn(name: &str) -> bool {
  matches!(
    name.to_ascii_lowercase().as_str(),
    "url" | "calc" | "var" | "env" | "clamp" | "counter" | "counters" | "attr" | "expression"
  )
}

/// A raw CSS function call like `url(...)` or `calc(...)` is kept verbatim
/// as an unquoted string, since its contents need not lex as Sass.
fn raw_call_literal(p: &mut P<'_, '_>, start: usize) -> Expr {
  let mut buf = String::new();
  let mut depth = 0usize;
  let mut i = start;
  loop {
    let Some(t) = p.raw(i) else { break };
    buf.push_str(t.text);
    i += 1;
    match t.kind {
      SK::LRound => depth += 1,
      SK::RRound => {
        depth -= 1;
        if depth == 0 {
          break;
        }
      }
      _ => {}
    }
  }
  p.set_raw_idx(i);
  let value = p.str(&buf);
  Some(p.expr_node(start, ExprData::String { value, quoted: false }))
}

/// After `(`: an empty list, a map, a comma list, or a parenthesized
/// expression.
fn paren(p: &mut P<'_, '_>, start: usize) -> Expr {
  p.bump();
  if p.eat(SK::RRound) {
    return Some(p.expr_node(start, ExprData::List {
      elems: Vec::new(),
      sep: ListSep::Comma,
      bracketed: false,
    }));
  }
  let first = space_list(p);
  if p.eat(SK::Colon) {
    let val = space_list(p);
    let mut entries = vec![(first, val)];
    while p.eat(SK::Comma) {
      if p.at(SK::RRound) {
        break;
      }
      let k = single(p);
      p.expect(SK::Colon);
      let v = space_list(p);
      entries.push((k, v));
    }
    p.expect(SK::RRound);
    return Some(p.expr_node(start, ExprData::Map { entries }));
  }
  if p.at(SK::Comma) {
    let mut elems = vec![first];
    while p.eat(SK::Comma) {
      if p.at(SK::RRound) {
        break;
      }
      elems.push(space_list(p));
    }
    p.expect(SK::RRound);
    return Some(p.expr_node(start, ExprData::List {
      elems,
      sep: ListSep::Comma,
      bracketed: false,
    }));
  }
  p.expect(SK::RRound);
  Some(p.expr_node(start, ExprData::Paren(first)))
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
  let bs = hex.as_bytes();
  if !bs.iter().all(u8::is_ascii_hexdigit) {
    return None;
  }
  match bs.len() {
    3 => {
      let one = |b: u8| {
        let d = hex_val(b);
        d * 16 + d
      };
      Some((one(bs[0]), one(bs[1]), one(bs[2])))
    }
    6 => {
      let two = |hi: u8, lo: u8| hex_val(hi) * 16 + hex_val(lo);
      Some((two(bs[0], bs[1]), two(bs[2], bs[3]), two(bs[4], bs[5])))
    }
    _ => None,
  }
}

fn hex_val(b: u8) -> u8 {
  match b {
    b'0'..=b'9' => b - b'0',
    b'a'..=b'f' => b - b'a' + 10,
    b'A'..=b'F' => b - b'A' + 10,
    _ => unreachable!("checked hexdigit"),
  }
}
