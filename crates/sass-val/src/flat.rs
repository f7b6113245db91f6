//! The flat-rule output model handed to the emitter.

/// One fully resolved declaration.
#[derive(Debug, Clone)]
pub struct FlatDecl {
  pub prop: String,
  pub value: String,
  pub important: bool,
}

/// Where a rule came from, for `source_comments` output.
#[derive(Debug, Clone, Copy)]
pub struct RuleSource {
  pub path: paths::PathId,
  /// 1-based line of the rule in its file.
  pub line: u32,
}

/// One flat rule: resolved selectors plus ordered declarations. Duplicate
/// properties stay; last-wins is CSS semantics, not the flattener's business.
#[derive(Debug, Clone)]
pub struct FlatRule {
  pub selectors: sass_selector::SelectorList,
  pub decls: Vec<FlatDecl>,
  pub source: Option<RuleSource>,
}

/// One item of flat output, in emission order.
#[derive(Debug, Clone)]
pub enum FlatItem {
  Rule(FlatRule),
  /// An at-rule like `@media`; a `None` body means no block at all.
  AtRule { name: String, params: String, body: Option<Vec<FlatItem>> },
  /// Bare declarations directly inside an at-rule body, like `@font-face`.
  Decls(Vec<FlatDecl>),
  /// A preserved `/*! */` comment.
  Comment(String),
  /// A plain-CSS `@import`, text kept verbatim.
  Import(String),
}
