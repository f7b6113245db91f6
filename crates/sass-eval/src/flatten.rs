//! Flattening: executing statements against the live environment, resolving
//! selectors against ancestor frames, and producing flat rules.

use crate::env::{FnDecl, MixinDecl};
use crate::error::{At, Error, Kind, NameKind, Result};
use crate::exec::{self, CallArgs};
use crate::Cx;
use crate::st::St;
use always::always;
use sass_ast::{Args, ExprMust, Params, StmtData, StmtMust, Str, Template, TemplatePart};
use sass_val::{FlatDecl, FlatItem, FlatRule, Number, RuleSource, Val};

fn err(at: StmtMust, kind: Kind) -> Error {
  Error { at: At::Stmt(at), kind }
}

/// Whether execution keeps going or a `@return` is unwinding.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Flow {
  Normal,
  Return,
}

/// Where statement output lands: declarations into the open rule (if any),
/// everything else into the item list.
pub(crate) struct Sink<'x> {
  pub(crate) decls: Option<&'x mut Vec<FlatDecl>>,
  pub(crate) out: &'x mut Vec<FlatItem>,
}

pub(crate) fn walk(cx: &mut Cx<'_>, st: &mut St, body: &[StmtMust], sink: &mut Sink<'_>) -> Result<Flow> {
  for &s in body {
    if let Flow::Return = walk_stmt(cx, st, s, sink)? {
      return Ok(Flow::Return);
    }
  }
  Ok(Flow::Normal)
}

#[expect(clippy::too_many_lines)]
fn walk_stmt(cx: &mut Cx<'_>, st: &mut St, s: StmtMust, sink: &mut Sink<'_>) -> Result<Flow> {
  let data = cx.stmts[s].clone();
  match data {
    StmtData::RuleBlock { prelude, body } => rule_block(cx, st, s, &prelude, &body, sink),
    StmtData::Declaration { name, value, important } => {
      let prop = resolve_template(cx, st, s, &name)?;
      let v = exec::get(cx, st, value)?;
      // a null value drops the declaration
      if matches!(v, Val::Null) {
        return Ok(Flow::Normal);
      }
      let Some(decls) = sink.decls.as_deref_mut() else {
        return Err(err(s, Kind::DeclarationOutsideRule));
      };
      let value = v.display(cx.strings, cx.fmt).to_string();
      decls.push(FlatDecl { prop, value, important });
      Ok(Flow::Normal)
    }
    StmtData::VariableAssign { name, value, global, default } => {
      let v = exec::get(cx, st, value)?;
      st.scopes.set_var(name, v, global, default);
      Ok(Flow::Normal)
    }
    StmtData::MixinDef { name, params, body } => {
      st.scopes.define_mixin(MixinDecl { name, params, body });
      Ok(Flow::Normal)
    }
    StmtData::FunctionDef { name, params, body } => {
      st.scopes.define_fn(FnDecl { name, params, body });
      Ok(Flow::Normal)
    }
    StmtData::Include { name, args, content } => {
      include(cx, st, s, name, &args, content, sink)
    }
    StmtData::Content => match st.content_stack.last().cloned() {
      None => Err(err(s, Kind::ContentOutsideMixin)),
      Some(None) => Ok(Flow::Normal),
      Some(Some(body)) => walk(cx, st, &body, sink),
    },
    StmtData::Return(value) => {
      if st.function_depth == 0 {
        return Err(err(s, Kind::ReturnOutsideFunction));
      }
      let v = exec::get(cx, st, value)?;
      st.returned = Some(v);
      Ok(Flow::Return)
    }
    StmtData::If { branches, else_body } => {
      for branch in branches {
        let cond = exec::get(cx, st, branch.cond)?;
        if cond.truthy() {
          return scoped_walk(cx, st, &branch.body, sink);
        }
      }
      match else_body {
        Some(body) => scoped_walk(cx, st, &body, sink),
        None => Ok(Flow::Normal),
      }
    }
    StmtData::Each { names, over, body } => {
      let items = exec::get(cx, st, over)?.into_items();
      for item in items {
        st.scopes.push();
        bind_each(st, &names, item);
        let flow = walk(cx, st, &body, sink);
        st.scopes.pop();
        if let Flow::Return = flow? {
          return Ok(Flow::Return);
        }
      }
      Ok(Flow::Normal)
    }
    StmtData::For { var, from, to, inclusive, body } => {
      let from_v = exec::get(cx, st, from)?;
      let to_v = exec::get(cx, st, to)?;
      let (Val::Number(a), Val::Number(b)) = (&from_v, &to_v) else {
        return Err(err(s, Kind::NonIntegerRange));
      };
      let (Some(lo), Some(hi)) = (a.as_int(), b.as_int()) else {
        return Err(err(s, Kind::NonIntegerRange));
      };
      let unit = a.unit;
      let idxs: Vec<i64> = if lo <= hi {
        let hi = if inclusive { hi } else { hi - 1 };
        (lo..=hi).collect()
      } else {
        let hi = if inclusive { hi } else { hi + 1 };
        (hi..=lo).rev().collect()
      };
      for i in idxs {
        st.scopes.push();
        #[expect(clippy::cast_precision_loss)]
        st.scopes.define_var(var, Val::Number(Number::new(i as f64, unit)));
        let flow = walk(cx, st, &body, sink);
        st.scopes.pop();
        if let Flow::Return = flow? {
          return Ok(Flow::Return);
        }
      }
      Ok(Flow::Normal)
    }
    StmtData::While { cond, body } => {
      loop {
        let c = exec::get(cx, st, cond)?;
        if !c.truthy() {
          return Ok(Flow::Normal);
        }
        st.scopes.push();
        let flow = walk(cx, st, &body, sink);
        st.scopes.pop();
        if let Flow::Return = flow? {
          return Ok(Flow::Return);
        }
      }
    }
    StmtData::Import { .. } => {
      let Some(targets) = cx.import_targets.get(&s).cloned() else {
        always!(false, "import should have been resolved before evaluation");
        return Ok(Flow::Normal);
      };
      for path in targets {
        if !st.evaluated_imports.insert(path) {
          log::debug!("skipping already-evaluated import");
          continue;
        }
        let Some(file) = cx.files.get(&path) else {
          always!(false, "resolved import should have a parsed file");
          continue;
        };
        let top = file.top.clone();
        if let Flow::Return = walk(cx, st, &top, sink)? {
          return Ok(Flow::Return);
        }
      }
      Ok(Flow::Normal)
    }
    StmtData::CssImport { text } => {
      let text = resolve_template(cx, st, s, &text)?;
      sink.out.push(FlatItem::Import(text));
      Ok(Flow::Normal)
    }
    StmtData::Extend { target, optional } => {
      let text = resolve_template(cx, st, s, &target)?;
      let parsed = sass_selector::parse(&text)
        .map_err(|error| err(s, Kind::Selector { text: text.clone(), error }))?;
      let Some(with) = st.current_selectors().cloned() else {
        return Err(err(s, Kind::ExtendOutsideRule));
      };
      let target = match single_simple(&parsed) {
        Some(simple) => simple,
        None => return Err(err(s, Kind::ExtendTargetNotSimple { text })),
      };
      st.extensions.push((sass_selector::Extension { target, with, optional }, s));
      Ok(Flow::Normal)
    }
    StmtData::AtRule { name, params, body } => at_rule(cx, st, s, name, &params, body, sink),
    StmtData::Warn(value) => {
      let v = exec::get(cx, st, value)?;
      log::warn!("{}", v.inspect(cx.strings, cx.fmt));
      Ok(Flow::Normal)
    }
    StmtData::Debug(value) => {
      let v = exec::get(cx, st, value)?;
      log::info!("{}", v.inspect(cx.strings, cx.fmt));
      Ok(Flow::Normal)
    }
    StmtData::Error(value) => {
      let v = exec::get(cx, st, value)?;
      let msg = v.inspect(cx.strings, cx.fmt).to_string();
      Err(err(s, Kind::User(msg)))
    }
    StmtData::LoudComment(text) => {
      sink.out.push(FlatItem::Comment(cx.strings.get(text).to_owned()));
      Ok(Flow::Normal)
    }
  }
}

fn scoped_walk(cx: &mut Cx<'_>, st: &mut St, body: &[StmtMust], sink: &mut Sink<'_>) -> Result<Flow> {
  st.scopes.push();
  let flow = walk(cx, st, body, sink);
  st.scopes.pop();
  flow
}

fn rule_block(
  cx: &mut Cx<'_>,
  st: &mut St,
  s: StmtMust,
  prelude: &Template,
  body: &[StmtMust],
  sink: &mut Sink<'_>,
) -> Result<Flow> {
  let text = resolve_template(cx, st, s, prelude)?;
  let parsed = sass_selector::parse(&text)
    .map_err(|error| err(s, Kind::Selector { text: text.clone(), error }))?;
  let resolved = sass_selector::resolve_nested(&parsed, st.current_selectors())
    .map_err(|_| err(s, Kind::ParentAtTopLevel))?;
  let source = rule_source(cx, s);
  st.selector_stack.push(resolved.clone());
  st.scopes.push();
  let mut rule = FlatRule { selectors: resolved, decls: Vec::new(), source };
  let mut children = Vec::<FlatItem>::new();
  let flow = {
    let mut inner = Sink { decls: Some(&mut rule.decls), out: &mut children };
    walk(cx, st, body, &mut inner)
  };
  st.scopes.pop();
  st.selector_stack.pop();
  let flow = flow?;
  // empty rule blocks are dropped; children still bubble out
  if !rule.decls.is_empty() {
    sink.out.push(FlatItem::Rule(rule));
  }
  sink.out.append(&mut children);
  Ok(flow)
}

fn at_rule(
  cx: &mut Cx<'_>,
  st: &mut St,
  s: StmtMust,
  name: Str,
  params: &Template,
  body: Option<Vec<StmtMust>>,
  sink: &mut Sink<'_>,
) -> Result<Flow> {
  let name = cx.strings.get(name).to_owned();
  let params = resolve_template(cx, st, s, params)?;
  let Some(body) = body else {
    sink.out.push(FlatItem::AtRule { name, params, body: None });
    return Ok(Flow::Normal);
  };
  let mut inner_items = Vec::<FlatItem>::new();
  st.scopes.push();
  let flow = if let Some(current) = st.current_selectors().cloned() {
    // declarations directly inside, e.g. `a { @media ... { color: red } }`,
    // attach to a rule with the enclosing selector
    let source = rule_source(cx, s);
    let mut inner_rule = FlatRule { selectors: current, decls: Vec::new(), source };
    let flow = {
      let mut inner = Sink { decls: Some(&mut inner_rule.decls), out: &mut inner_items };
      walk(cx, st, &body, &mut inner)
    };
    if !inner_rule.decls.is_empty() {
      inner_items.insert(0, FlatItem::Rule(inner_rule));
    }
    flow
  } else {
    // bare declarations are legal directly inside at-rules like @font-face
    let mut bare = Vec::<FlatDecl>::new();
    let flow = {
      let mut inner = Sink { decls: Some(&mut bare), out: &mut inner_items };
      walk(cx, st, &body, &mut inner)
    };
    if !bare.is_empty() {
      inner_items.insert(0, FlatItem::Decls(bare));
    }
    flow
  };
  st.scopes.pop();
  let flow = flow?;
  sink.out.push(FlatItem::AtRule { name, params, body: Some(inner_items) });
  Ok(flow)
}

fn include(
  cx: &mut Cx<'_>,
  st: &mut St,
  s: StmtMust,
  name: Str,
  args: &Args,
  content: Option<Vec<StmtMust>>,
  sink: &mut Sink<'_>,
) -> Result<Flow> {
  let Some(decl) = st.scopes.get_mixin(name).cloned() else {
    return Err(err(s, Kind::UndefinedName { name, what: NameKind::Mixin }));
  };
  let evaled = exec::eval_args(cx, st, args)?;
  st.scopes.push();
  let bound = bind_params(cx, st, At::Stmt(s), &decl.params, &evaled);
  let flow = match bound {
    Ok(()) => {
      st.content_stack.push(content);
      let flow = walk(cx, st, &decl.body, sink);
      st.content_stack.pop();
      flow
    }
    Err(e) => Err(e),
  };
  st.scopes.pop();
  flow
}

/// Calls a user-defined function. Arguments evaluate in the caller's scope;
/// parameter defaults evaluate in the function's own scope.
pub(crate) fn call_function(
  cx: &mut Cx<'_>,
  st: &mut St,
  e: ExprMust,
  decl: &FnDecl,
  args: &Args,
) -> Result<Val> {
  let evaled = exec::eval_args(cx, st, args)?;
  st.scopes.push();
  st.function_depth += 1;
  let saved = st.returned.take();
  let result = run_function(cx, st, e, decl, &evaled);
  st.function_depth -= 1;
  st.returned = saved;
  st.scopes.pop();
  result
}

fn run_function(
  cx: &mut Cx<'_>,
  st: &mut St,
  e: ExprMust,
  decl: &FnDecl,
  evaled: &CallArgs,
) -> Result<Val> {
  bind_params(cx, st, At::Expr(e), &decl.params, evaled)?;
  let mut discard = Vec::<FlatItem>::new();
  let mut sink = Sink { decls: None, out: &mut discard };
  walk(cx, st, &decl.body, &mut sink)?;
  match st.returned.take() {
    Some(v) => Ok(v),
    None => Err(exec::err(e, Kind::FunctionNoReturn { name: decl.name })),
  }
}

/// Binds evaluated arguments to parameters in the current (just-pushed)
/// scope.
fn bind_params(
  cx: &mut Cx<'_>,
  st: &mut St,
  at: At,
  params: &Params,
  evaled: &CallArgs,
) -> Result<()> {
  let mk = |kind: Kind| Error { at, kind };
  if evaled.positional.len() > params.params.len() {
    return Err(mk(Kind::TooManyArgs {
      want: params.params.len(),
      got: evaled.positional.len(),
    }));
  }
  for (name, _) in &evaled.named {
    if !params.params.iter().any(|p| p.name == *name) {
      return Err(mk(Kind::NoSuchArg { name: *name }));
    }
  }
  for (i, param) in params.params.iter().enumerate() {
    if let Some(v) = evaled.positional.get(i) {
      st.scopes.define_var(param.name, v.clone());
      continue;
    }
    if let Some((_, v)) = evaled.named.iter().find(|(n, _)| *n == param.name) {
      st.scopes.define_var(param.name, v.clone());
      continue;
    }
    match param.default {
      Some(_) => {
        let v = exec::get(cx, st, param.default)?;
        st.scopes.define_var(param.name, v);
      }
      None => return Err(mk(Kind::MissingArg { name: param.name })),
    }
  }
  Ok(())
}

fn bind_each(st: &mut St, names: &[Str], item: Val) {
  if let [name] = names {
    st.scopes.define_var(*name, item);
    return;
  }
  let items = item.into_items();
  for (i, &name) in names.iter().enumerate() {
    st.scopes.define_var(name, items.get(i).cloned().unwrap_or(Val::Null));
  }
}

/// Resolves a template to text, evaluating its interpolations.
pub(crate) fn resolve_template(
  cx: &mut Cx<'_>,
  st: &mut St,
  s: StmtMust,
  tpl: &Template,
) -> Result<String> {
  let _ = s;
  let mut out = String::new();
  for part in &tpl.parts {
    match part {
      TemplatePart::Lit(t) => out.push_str(cx.strings.get(*t)),
      TemplatePart::Expr(e) => {
        let v = exec::get(cx, st, *e)?;
        out.push_str(&exec::interpolated_text(cx, &v));
      }
    }
  }
  Ok(out)
}

fn rule_source(cx: &Cx<'_>, s: StmtMust) -> Option<RuleSource> {
  let src = cx.ptrs.stmts.get(s)?;
  let db = cx.pos_dbs.get(&src.file)?;
  let range = db.range_utf16(src.range)?;
  Some(RuleSource { path: src.file, line: range.start.line + 1 })
}

fn single_simple(list: &sass_selector::SelectorList) -> Option<sass_selector::SimpleSelector> {
  let [complex] = list.complexes.as_slice() else { return None };
  if !complex.rest.is_empty() {
    return None;
  }
  let [simple] = complex.first.simples.as_slice() else { return None };
  Some(simple.clone())
}

/// Runs the registered extensions over the finished items, then removes
/// placeholder selectors.
pub(crate) fn finish(st: &St, items: &mut Vec<FlatItem>) -> Result<()> {
  for (ext, s) in &st.extensions {
    let mut matched = false;
    for_each_rule(items, &mut |rule| {
      if sass_selector::extend_list(&mut rule.selectors, ext) {
        matched = true;
      }
    });
    if !matched && !ext.optional {
      return Err(err(*s, Kind::ExtendNotFound { target: ext.target.to_string() }));
    }
  }
  drop_placeholders(items);
  Ok(())
}

fn for_each_rule(items: &mut [FlatItem], f: &mut impl FnMut(&mut FlatRule)) {
  for item in items {
    match item {
      FlatItem::Rule(rule) => f(rule),
      FlatItem::AtRule { body: Some(body), .. } => for_each_rule(body, f),
      FlatItem::AtRule { body: None, .. }
      | FlatItem::Decls(_)
      | FlatItem::Comment(_)
      | FlatItem::Import(_) => {}
    }
  }
}

fn drop_placeholders(items: &mut Vec<FlatItem>) {
  items.retain_mut(|item| match item {
    FlatItem::Rule(rule) => {
      rule.selectors.drop_placeholders();
      !rule.selectors.is_empty()
    }
    FlatItem::AtRule { body: Some(body), .. } => {
      drop_placeholders(body);
      true
    }
    FlatItem::AtRule { body: None, .. }
    | FlatItem::Decls(_)
    | FlatItem::Comment(_)
    | FlatItem::Import(_) => true,
  });
}
