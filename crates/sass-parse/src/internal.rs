//! Parser state and the statement grammar.

use crate::{Error, Expected, expr};
use sass_ast::{
  Arenas, Args, ExprData, ExprMust, IfBranch, Param, Params, Pointers, Source, StmtData, StmtMust,
  Str, Template, TemplatePart,
};
use sass_syntax::kind::SyntaxKind as SK;
use text_size::{TextRange, TextSize};
use token::Triviable as _;

pub(crate) struct P<'a, 'b> {
  tokens: &'a [token::Token<'a, SK>],
  offsets: Vec<TextSize>,
  idx: usize,
  file: paths::PathId,
  pub(crate) ars: &'b mut Arenas,
  ptrs: &'b mut Pointers,
  errors: Vec<Error>,
}

impl<'a, 'b> P<'a, 'b> {
  pub(crate) fn new(
    ars: &'b mut Arenas,
    ptrs: &'b mut Pointers,
    file: paths::PathId,
    tokens: &'a [token::Token<'a, SK>],
  ) -> P<'a, 'b> {
    let mut offsets = Vec::with_capacity(tokens.len() + 1);
    let mut off = TextSize::new(0);
    offsets.push(off);
    for tok in tokens {
      off += TextSize::of(tok.text);
      offsets.push(off);
    }
    P { tokens, offsets, idx: 0, file, ars, ptrs, errors: Vec::new() }
  }

  pub(crate) fn finish(self, top: Vec<StmtMust>) -> crate::Parse {
    crate::Parse { top, errors: self.errors }
  }

  /// Moves past leading trivia, then returns the index of the current token.
  pub(crate) fn skip_trivia(&mut self) -> usize {
    while self.tokens.get(self.idx).is_some_and(|t| t.kind.is_trivia()) {
      self.idx += 1;
    }
    self.idx
  }

  pub(crate) fn peek(&mut self) -> Option<token::Token<'a, SK>> {
    let i = self.skip_trivia();
    self.tokens.get(i).copied()
  }

  pub(crate) fn peek_kind(&mut self) -> Option<SK> {
    self.peek().map(|t| t.kind)
  }

  /// The kind of the token after the current one, ignoring trivia.
  pub(crate) fn peek2_kind(&mut self) -> Option<SK> {
    let mut i = self.skip_trivia() + 1;
    while self.tokens.get(i).is_some_and(|t| t.kind.is_trivia()) {
      i += 1;
    }
    self.tokens.get(i).map(|t| t.kind)
  }

  pub(crate) fn bump(&mut self) -> Option<token::Token<'a, SK>> {
    let tok = self.peek()?;
    self.idx += 1;
    Some(tok)
  }

  pub(crate) fn at(&mut self, kind: SK) -> bool {
    self.peek_kind() == Some(kind)
  }

  pub(crate) fn at_ident(&mut self, text: &str) -> bool {
    self.peek().is_some_and(|t| t.kind == SK::Ident && t.text == text)
  }

  pub(crate) fn eat(&mut self, kind: SK) -> bool {
    if self.at(kind) {
      self.idx += 1;
      true
    } else {
      false
    }
  }

  pub(crate) fn expect(&mut self, kind: SK) {
    if !self.eat(kind) {
      self.err(Expected::Kind(kind));
    }
  }

  /// The raw token at an exact index, for adjacency checks.
  pub(crate) fn raw(&self, i: usize) -> Option<token::Token<'a, SK>> {
    self.tokens.get(i).copied()
  }

  pub(crate) fn raw_idx(&self) -> usize {
    self.idx
  }

  pub(crate) fn set_raw_idx(&mut self, i: usize) {
    self.idx = i;
  }

  fn cur_range(&mut self) -> TextRange {
    let i = self.skip_trivia();
    let start = self.offsets[i];
    let end = self.offsets.get(i + 1).copied().unwrap_or(start);
    TextRange::new(start, end)
  }

  pub(crate) fn err(&mut self, expected: Expected) {
    let range = self.cur_range();
    let found = self.peek_kind();
    self.errors.push(Error { range, expected, found });
  }

  pub(crate) fn str(&mut self, text: &str) -> Str {
    self.ars.strings.str(text)
  }

  fn range_from(&self, start: usize) -> TextRange {
    let lo = self.offsets[start];
    let hi = self.offsets[self.idx];
    TextRange::new(lo.min(hi), hi.max(lo))
  }

  pub(crate) fn expr_node(&mut self, start: usize, data: ExprData) -> ExprMust {
    let e = self.ars.exprs.alloc(data);
    self.ptrs.exprs.insert(e, Source { file: self.file, range: self.range_from(start) });
    e
  }

  pub(crate) fn stmt_node(&mut self, start: usize, data: StmtData) -> StmtMust {
    let s = self.ars.stmts.alloc(data);
    self.ptrs.stmts.insert(s, Source { file: self.file, range: self.range_from(start) });
    s
  }
}

/// Parses statements until a block close or end of input.
pub(crate) fn items(p: &mut P<'_, '_>) -> Vec<StmtMust> {
  let mut out = Vec::<StmtMust>::new();
  loop {
    while p.eat(SK::Semicolon) || p.eat(SK::Eol) {}
    match p.peek_kind() {
      None | Some(SK::RCurly | SK::Dedent) => break,
      Some(_) => {}
    }
    let before = p.raw_idx();
    item(p, &mut out);
    if p.raw_idx() == before {
      p.err(Expected::Statement);
      p.bump();
    }
  }
  out
}

/// Errors if tokens remain after the top-level items.
pub(crate) fn trailing(p: &mut P<'_, '_>) {
  if p.peek_kind().is_some() {
    p.err(Expected::Statement);
  }
}

fn item(p: &mut P<'_, '_>, out: &mut Vec<StmtMust>) {
  let start = p.skip_trivia();
  let Some(tok) = p.peek() else { return };
  match tok.kind {
    SK::LoudComment => {
      p.bump();
      let text = p.str(tok.text);
      out.push(p.stmt_node(start, StmtData::LoudComment(text)));
    }
    SK::AtKeyword => at_rule(p, out, start, tok.text),
    SK::Variable if p.peek2_kind() == Some(SK::Colon) => {
      out.push(var_assign(p, start, tok.text));
    }
    _ => decl_or_rule(p, out, start),
  }
}

/// Opens a block, parses its items, closes it.
fn block(p: &mut P<'_, '_>) -> Vec<StmtMust> {
  if p.eat(SK::LCurly) {
    let ret = items(p);
    p.expect(SK::RCurly);
    ret
  } else if p.eat(SK::Indent) {
    let ret = items(p);
    p.expect(SK::Dedent);
    ret
  } else {
    p.err(Expected::Block);
    Vec::new()
  }
}

fn at_block(p: &mut P<'_, '_>) -> bool {
  matches!(p.peek_kind(), Some(SK::LCurly | SK::Indent))
}

fn stmt_end(p: &mut P<'_, '_>) {
  if p.eat(SK::Semicolon) || p.eat(SK::Eol) {
    return;
  }
  match p.peek_kind() {
    None | Some(SK::RCurly | SK::Dedent) => {}
    Some(_) => p.err(Expected::Kind(SK::Semicolon)),
  }
}

/// Decides whether the upcoming statement is a declaration or a nested rule
/// by scanning ahead for a block open before a terminator.
fn decl_or_rule(p: &mut P<'_, '_>, out: &mut Vec<StmtMust>, start: usize) {
  let mut j = start;
  let mut depth = 0usize;
  let mut curly = 0usize;
  let is_rule = loop {
    let Some(t) = p.raw(j) else { break false };
    match t.kind {
      SK::LRound | SK::LSquare => depth += 1,
      SK::RRound | SK::RSquare => depth = depth.saturating_sub(1),
      SK::HashLCurly => curly += 1,
      SK::RCurly => {
        if curly == 0 {
          break false;
        }
        curly -= 1;
      }
      SK::LCurly if depth == 0 && curly == 0 => break true,
      SK::Indent if curly == 0 => break true,
      SK::Semicolon | SK::Eol | SK::Dedent if depth == 0 && curly == 0 => break false,
      _ => {}
    }
    j += 1;
  };
  if is_rule {
    let prelude = template(p, &[SK::LCurly, SK::Indent]);
    let body = block(p);
    out.push(p.stmt_node(start, StmtData::RuleBlock { prelude, body }));
  } else {
    out.push(declaration(p, start));
  }
}

fn declaration(p: &mut P<'_, '_>, start: usize) -> StmtMust {
  let name = template(p, &[SK::Colon]);
  p.expect(SK::Colon);
  let value = expr::expr(p);
  let mut important = false;
  while p.eat(SK::Bang) {
    if p.at_ident("important") {
      p.bump();
      important = true;
    } else {
      p.err(Expected::Kind(SK::Bang));
      break;
    }
  }
  stmt_end(p);
  p.stmt_node(start, StmtData::Declaration { name, value, important })
}

fn var_assign(p: &mut P<'_, '_>, start: usize, text: &str) -> StmtMust {
  p.bump();
  let name = p.str(&text[1..]);
  p.expect(SK::Colon);
  let value = expr::expr(p);
  let mut global = false;
  let mut default = false;
  while p.eat(SK::Bang) {
    if p.at_ident("global") {
      p.bump();
      global = true;
    } else if p.at_ident("default") {
      p.bump();
      default = true;
    } else {
      p.err(Expected::Ident);
      break;
    }
  }
  stmt_end(p);
  p.stmt_node(start, StmtData::VariableAssign { name, value, global, default })
}

/// Collects raw token text into a template until one of `stops` (or a hard
/// terminator) at interpolation depth zero, lowering `#{}` to expression
/// parts. Leading and trailing whitespace are trimmed.
pub(crate) fn template(p: &mut P<'_, '_>, stops: &[SK]) -> Template {
  p.skip_trivia();
  let mut parts = Vec::<TemplatePart>::new();
  let mut buf = String::new();
  loop {
    let Some(t) = p.raw(p.raw_idx()) else { break };
    if stops.contains(&t.kind) {
      break;
    }
    match t.kind {
      SK::Semicolon | SK::Eol | SK::Dedent | SK::RCurly | SK::Indent | SK::LCurly => break,
      SK::HashLCurly => {
        p.bump();
        if !buf.is_empty() {
          let s = p.str(&buf);
          parts.push(TemplatePart::Lit(s));
          buf.clear();
        }
        let e = expr::expr(p);
        parts.push(TemplatePart::Expr(e));
        p.expect(SK::RCurly);
      }
      _ => {
        buf.push_str(t.text);
        let i = p.raw_idx();
        p.set_raw_idx(i + 1);
      }
    }
  }
  if !buf.is_empty() {
    let s = p.str(&buf);
    parts.push(TemplatePart::Lit(s));
  }
  trim_template(p, &mut parts);
  Template { parts }
}

fn trim_template(p: &mut P<'_, '_>, parts: &mut Vec<TemplatePart>) {
  if let Some(TemplatePart::Lit(s)) = parts.first() {
    let text = p.ars.strings.get(*s).trim_start().to_owned();
    if text.is_empty() && parts.len() > 1 {
      parts.remove(0);
    } else {
      let s = p.str(&text);
      parts[0] = TemplatePart::Lit(s);
    }
  }
  if let Some(TemplatePart::Lit(s)) = parts.last() {
    let text = p.ars.strings.get(*s).trim_end().to_owned();
    let last = parts.len() - 1;
    if text.is_empty() && parts.len() > 1 {
      parts.pop();
    } else {
      let s = p.str(&text);
      parts[last] = TemplatePart::Lit(s);
    }
  }
}

#[expect(clippy::too_many_lines)]
fn at_rule(p: &mut P<'_, '_>, out: &mut Vec<StmtMust>, start: usize, at_text: &str) {
  p.bump();
  let name = &at_text[1..];
  match name {
    "if" => {
      let mut branches = Vec::<IfBranch>::new();
      let mut else_body = None::<Vec<StmtMust>>;
      let cond = expr::single(p);
      let body = block(p);
      branches.push(IfBranch { cond, body });
      loop {
        let Some(tok) = p.peek() else { break };
        if tok.kind != SK::AtKeyword || tok.text != "@else" {
          break;
        }
        p.bump();
        if p.at_ident("if") {
          p.bump();
          let cond = expr::single(p);
          let body = block(p);
          branches.push(IfBranch { cond, body });
        } else {
          else_body = Some(block(p));
          break;
        }
      }
      out.push(p.stmt_node(start, StmtData::If { branches, else_body }));
    }
    "each" => {
      let mut names = Vec::<Str>::new();
      loop {
        match p.peek() {
          Some(tok) if tok.kind == SK::Variable => {
            p.bump();
            names.push(p.str(&tok.text[1..]));
          }
          _ => p.err(Expected::Variable),
        }
        if !p.eat(SK::Comma) {
          break;
        }
      }
      if p.at_ident("in") {
        p.bump();
      } else {
        p.err(Expected::Ident);
      }
      let over = expr::expr(p);
      let body = block(p);
      out.push(p.stmt_node(start, StmtData::Each { names, over, body }));
    }
    "for" => {
      let var = match p.peek() {
        Some(tok) if tok.kind == SK::Variable => {
          p.bump();
          p.str(&tok.text[1..])
        }
        _ => {
          p.err(Expected::Variable);
          p.str("")
        }
      };
      if p.at_ident("from") {
        p.bump();
      } else {
        p.err(Expected::Ident);
      }
      let from = expr::single(p);
      let inclusive = if p.at_ident("through") {
        p.bump();
        true
      } else if p.at_ident("to") {
        p.bump();
        false
      } else {
        p.err(Expected::Ident);
        true
      };
      let to = expr::single(p);
      let body = block(p);
      out.push(p.stmt_node(start, StmtData::For { var, from, to, inclusive, body }));
    }
    "while" => {
      let cond = expr::single(p);
      let body = block(p);
      out.push(p.stmt_node(start, StmtData::While { cond, body }));
    }
    "mixin" | "function" => {
      let fn_name = match p.peek() {
        Some(tok) if tok.kind == SK::Ident => {
          p.bump();
          p.str(tok.text)
        }
        _ => {
          p.err(Expected::Ident);
          p.str("")
        }
      };
      let params = if p.at(SK::LRound) { params(p) } else { Params::default() };
      let body = block(p);
      let data = if name == "mixin" {
        StmtData::MixinDef { name: fn_name, params, body }
      } else {
        StmtData::FunctionDef { name: fn_name, params, body }
      };
      out.push(p.stmt_node(start, data));
    }
    "include" => {
      let mixin_name = match p.peek() {
        Some(tok) if tok.kind == SK::Ident => {
          p.bump();
          p.str(tok.text)
        }
        _ => {
          p.err(Expected::Ident);
          p.str("")
        }
      };
      let args = if p.at(SK::LRound) { args(p) } else { Args::default() };
      let content = if at_block(p) {
        Some(block(p))
      } else {
        stmt_end(p);
        None
      };
      out.push(p.stmt_node(start, StmtData::Include { name: mixin_name, args, content }));
    }
    "content" => {
      stmt_end(p);
      out.push(p.stmt_node(start, StmtData::Content));
    }
    "return" => {
      let value = expr::expr(p);
      stmt_end(p);
      out.push(p.stmt_node(start, StmtData::Return(value)));
    }
    "import" => {
      import(p, out, start);
      stmt_end(p);
    }
    "extend" => {
      let target = template(p, &[SK::Bang]);
      let optional = if p.eat(SK::Bang) {
        if p.at_ident("optional") {
          p.bump();
          true
        } else {
          p.err(Expected::Ident);
          false
        }
      } else {
        false
      };
      stmt_end(p);
      out.push(p.stmt_node(start, StmtData::Extend { target, optional }));
    }
    "warn" | "debug" | "error" => {
      let value = expr::expr(p);
      stmt_end(p);
      let data = match name {
        "warn" => StmtData::Warn(value),
        "debug" => StmtData::Debug(value),
        _ => StmtData::Error(value),
      };
      out.push(p.stmt_node(start, data));
    }
    "charset" => {
      if p.at(SK::String) {
        p.bump();
      }
      stmt_end(p);
    }
    _ => {
      let at_name = p.str(name);
      let params = template(p, &[]);
      let body = if at_block(p) {
        Some(block(p))
      } else {
        stmt_end(p);
        None
      };
      out.push(p.stmt_node(start, StmtData::AtRule { name: at_name, params, body }));
    }
  }
}

/// One `@import` statement may produce several directives.
fn import(p: &mut P<'_, '_>, out: &mut Vec<StmtMust>, start: usize) {
  loop {
    match p.peek() {
      Some(tok) if tok.kind == SK::String => {
        p.bump();
        let inner = strip_quotes(tok.text);
        if is_plain_css_import(inner) || has_media_query(p) {
          let mut text = tok.text.to_owned();
          if has_media_query(p) {
            let rest = template(p, &[SK::Comma]);
            text.push(' ');
            push_template_text(p, &mut text, &rest);
            let lit = p.str(&text);
            out.push(p.stmt_node(start, StmtData::CssImport {
              text: Template { parts: vec![TemplatePart::Lit(lit)] },
            }));
          } else {
            let lit = p.str(&text);
            out.push(p.stmt_node(start, StmtData::CssImport {
              text: Template { parts: vec![TemplatePart::Lit(lit)] },
            }));
          }
        } else {
          let path = p.str(inner);
          out.push(p.stmt_node(start, StmtData::Import { path }));
        }
      }
      Some(tok) if tok.kind == SK::Ident && tok.text == "url" => {
        let text_tpl = template(p, &[SK::Comma]);
        out.push(p.stmt_node(start, StmtData::CssImport { text: text_tpl }));
      }
      _ => {
        p.err(Expected::Kind(SK::String));
        break;
      }
    }
    if !p.eat(SK::Comma) {
      break;
    }
  }
}

/// Whether there is still import text before the statement terminator, i.e. a
/// trailing media query.
fn has_media_query(p: &mut P<'_, '_>) -> bool {
  !matches!(
    p.peek_kind(),
    None | Some(SK::Comma | SK::Semicolon | SK::Eol | SK::RCurly | SK::Dedent)
  )
}

fn push_template_text(p: &mut P<'_, '_>, buf: &mut String, tpl: &Template) {
  for part in &tpl.parts {
    if let TemplatePart::Lit(s) = part {
      buf.push_str(p.ars.strings.get(*s));
    }
  }
}

pub(crate) fn strip_quotes(text: &str) -> &str {
  let bs = text.as_bytes();
  if bs.len() >= 2 && (bs[0] == b'"' || bs[0] == b'\'') && bs[bs.len() - 1] == bs[0] {
    &text[1..text.len() - 1]
  } else {
    text
  }
}

/// Whether an `@import` url is plain CSS, passed through instead of resolved.
#[must_use]
pub(crate) fn is_plain_css_import(url: &str) -> bool {
  url.ends_with(".css")
    || url.starts_with("http://")
    || url.starts_with("https://")
    || url.starts_with("//")
}

fn params(p: &mut P<'_, '_>) -> Params {
  p.expect(SK::LRound);
  let mut ret = Params::default();
  loop {
    if p.at(SK::RRound) {
      break;
    }
    match p.peek() {
      Some(tok) if tok.kind == SK::Variable => {
        p.bump();
        let name = p.str(&tok.text[1..]);
        let default = if p.eat(SK::Colon) { expr::space_list(p) } else { None };
        ret.params.push(Param { name, default });
      }
      _ => {
        p.err(Expected::Variable);
        break;
      }
    }
    if !p.eat(SK::Comma) {
      break;
    }
  }
  p.expect(SK::RRound);
  ret
}

pub(crate) fn args(p: &mut P<'_, '_>) -> Args {
  p.expect(SK::LRound);
  let mut ret = Args::default();
  loop {
    if p.at(SK::RRound) {
      break;
    }
    let named = match p.peek() {
      Some(tok) if tok.kind == SK::Variable && p.peek2_kind() == Some(SK::Colon) => {
        p.bump();
        p.expect(SK::Colon);
        Some(p.str(&tok.text[1..]))
      }
      _ => None,
    };
    let value = expr::space_list(p);
    match named {
      Some(name) => ret.named.push((name, value)),
      None => ret.positional.push(value),
    }
    if !p.eat(SK::Comma) {
      break;
    }
  }
  p.expect(SK::RRound);
  ret
}
