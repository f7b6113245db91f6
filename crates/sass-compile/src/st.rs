//! The state of one compilation: the suspendable import pump, then the
//! evaluation and emission pass.

use crate::error::{CompileError, Status};
use crate::{CompileResult, Input, Options, Step};
use rustc_hash::FxHashMap;
use sass_ast::{Arenas, Pointers, StmtArena, StmtData, StmtMust};
use sass_import::{ImportAnswer, ImportRequest};
use sass_syntax::Mode;

/// One compilation. Owns every arena, cache, and in-flight marker, so
/// cancellation is `drop` and compilations share nothing mutable.
///
/// Drive it by calling [`Compilation::step`] until it returns [`Step::Done`].
/// Whenever it returns [`Step::NeedImport`], answer with
/// [`Compilation::provide`] — immediately for a synchronous host, or after
/// any amount of awaiting for an asynchronous one.
#[derive(Debug)]
pub struct Compilation {
  opts: Options,
  input: Option<Input>,
  ars: Arenas,
  ptrs: Pointers,
  paths: paths::Store,
  files: paths::PathMap<sass_eval::File>,
  sources: paths::PathMap<String>,
  pos_dbs: paths::PathMap<text_pos::PositionDb>,
  import_targets: FxHashMap<StmtMust, Vec<paths::PathId>>,
  /// Every file that contributed, in load order.
  included: Vec<paths::PathId>,
  /// In-flight files; re-entering one of these is an import cycle.
  loading: Vec<paths::PathId>,
  work: Vec<Frame>,
  pending: Option<Pending>,
  root: Option<paths::PathId>,
  root_dir: Option<paths::CleanPathBuf>,
  failed: Option<CompileError>,
  finished: bool,
}

#[derive(Debug)]
struct Frame {
  file: paths::PathId,
  /// Unresolved import directives, reversed so `pop` yields source order.
  imports: Vec<StmtMust>,
}

#[derive(Debug)]
struct Pending {
  stmt: StmtMust,
  from: paths::PathId,
  url: String,
}

impl Compilation {
  #[must_use]
  pub fn new(input: Input, opts: Options) -> Self {
    Self {
      opts,
      input: Some(input),
      ars: Arenas::default(),
      ptrs: Pointers::default(),
      paths: paths::Store::default(),
      files: paths::PathMap::default(),
      sources: paths::PathMap::default(),
      pos_dbs: paths::PathMap::default(),
      import_targets: FxHashMap::default(),
      included: Vec::new(),
      loading: Vec::new(),
      work: Vec::new(),
      pending: None,
      root: None,
      root_dir: None,
      failed: None,
      finished: false,
    }
  }

  /// Advances the compilation as far as it can go without outside help.
  ///
  /// # Panics
  ///
  /// If called again after returning [`Step::Done`].
  pub fn step<F>(&mut self, fs: &F) -> Step
  where
    F: paths::FileSystem,
  {
    assert!(!self.finished, "step called after Done");
    if let Some(input) = self.input.take() {
      if let Err(e) = self.load_root(fs, input) {
        self.failed = Some(e);
      }
    }
    loop {
      if let Some(e) = self.failed.take() {
        self.finished = true;
        return Step::Done(Box::new(Err(e)));
      }
      if let Some(p) = &self.pending {
        let from_path = self.paths.get_path(p.from).as_path().to_owned();
        return Step::NeedImport(ImportRequest {
          url: p.url.clone(),
          from: p.from,
          from_path,
        });
      }
      if self.work.is_empty() {
        self.finished = true;
        let res = self.finish();
        return Step::Done(Box::new(res));
      }
      let (from, stmt) = {
        let frame = self.work.last_mut().expect("work is non-empty");
        (frame.file, frame.imports.pop())
      };
      match stmt {
        Some(stmt) => {
          let url = match &self.ars.stmts[stmt] {
            StmtData::Import { path } => self.ars.strings.get(*path).to_owned(),
            _ => continue,
          };
          log::debug!("requesting import {url:?}");
          self.pending = Some(Pending { stmt, from, url });
        }
        None => {
          self.loading.pop();
          self.work.pop();
        }
      }
    }
  }

  /// Supplies the answer to the outstanding [`Step::NeedImport`].
  ///
  /// # Panics
  ///
  /// If there is no outstanding import request.
  pub fn provide<F>(&mut self, fs: &F, answer: ImportAnswer)
  where
    F: paths::FileSystem,
  {
    let pending = self.pending.take().expect("provide with no pending import");
    if let Err(e) = self.handle_answer(fs, &pending, answer) {
      self.failed = Some(e);
    }
  }

  fn handle_answer<F>(
    &mut self,
    fs: &F,
    pending: &Pending,
    answer: ImportAnswer,
  ) -> Result<(), CompileError>
  where
    F: paths::FileSystem,
  {
    match answer {
      ImportAnswer::NotFound => Err(self.not_found(pending, &[])),
      ImportAnswer::UseDefault => self.default_resolve(fs, pending),
      ImportAnswer::Files(files) => {
        for pf in files {
          let clean = self.join_from(pending.from, &pf.path);
          let text = match pf.contents {
            Some(text) => text,
            None => fs.read_to_string(clean.as_path()).map_err(|e| {
              CompileError::plain(
                Status::Import,
                format!("couldn't read {}: {e}", clean.as_path().display()),
              )
            })?,
          };
          let mode = Mode::from_extension(pf.path.extension().and_then(|x| x.to_str()));
          self.load_file(clean, text, mode, Some(pending.stmt))?;
        }
        Ok(())
      }
    }
  }

  /// Built-in resolution: the importing file's directory, then the include
  /// paths, each tried with the Sass candidate spellings.
  fn default_resolve<F>(&mut self, fs: &F, pending: &Pending) -> Result<(), CompileError>
  where
    F: paths::FileSystem,
  {
    let dirs = self.search_dirs(pending.from);
    let found = sass_import::get(&pending.url, dirs.iter().map(paths::CleanPathBuf::as_clean_path), fs);
    let Some(found) = found else {
      return Err(self.not_found(pending, &dirs));
    };
    let mode =
      Mode::from_extension(found.as_path().extension().and_then(|x| x.to_str()));
    let text = fs.read_to_string(found.as_path()).map_err(|e| {
      CompileError::plain(
        Status::Import,
        format!("couldn't read {}: {e}", found.as_path().display()),
      )
    })?;
    self.load_file(found, text, mode, Some(pending.stmt))?;
    Ok(())
  }

  fn search_dirs(&self, from: paths::PathId) -> Vec<paths::CleanPathBuf> {
    let mut dirs = Vec::<paths::CleanPathBuf>::new();
    if let Some(parent) = self.paths.get_path(from).parent() {
      dirs.push(parent.to_owned());
    }
    if let Some(root) = &self.root_dir {
      for p in &self.opts.include_paths {
        dirs.push(root.as_clean_path().join(p.as_path()));
      }
    }
    dirs
  }

  fn not_found(&self, pending: &Pending, searched: &[paths::CleanPathBuf]) -> CompileError {
    let mut message = format!("file to import not found or unreadable: {}", pending.url);
    if !searched.is_empty() {
      message.push_str("\nsearched:");
      for dir in searched {
        message.push_str("\n  ");
        message.push_str(&dir.as_path().display().to_string());
      }
    }
    CompileError {
      message,
      path: Some(self.paths.get_path(pending.from).as_path().to_owned()),
      line: None,
      column: None,
      status: Status::Import,
    }
  }

  fn load_root<F>(&mut self, fs: &F, input: Input) -> Result<(), CompileError>
  where
    F: paths::FileSystem,
  {
    let cwd = fs.current_dir().map_err(|e| {
      CompileError::plain(Status::Import, format!("couldn't get current dir: {e}"))
    })?;
    self.root_dir = Some(cwd.clone());
    let id = match input {
      Input::File(p) => {
        let clean = cwd.as_clean_path().join(p.as_path());
        let mode = Mode::from_extension(p.extension().and_then(|x| x.to_str()));
        let text = fs.read_to_string(clean.as_path()).map_err(|e| CompileError {
          message: format!("couldn't read {}: {e}", p.display()),
          path: Some(p.clone()),
          line: None,
          column: None,
          status: Status::Import,
        })?;
        self.load_file(clean, text, mode, None)?
      }
      Input::Text { text, path } => {
        let logical = path.unwrap_or_else(|| std::path::PathBuf::from("stdin"));
        let clean = cwd.as_clean_path().join(logical.as_path());
        let mode = if self.opts.indented_syntax { Mode::Indented } else { Mode::Scss };
        self.load_file(clean, text, mode, None)?
      }
    };
    self.root = Some(id);
    Ok(())
  }

  /// Parses one file into the shared arenas and queues its imports. A file
  /// already parsed under the same canonical identity is never re-parsed.
  fn load_file(
    &mut self,
    clean: paths::CleanPathBuf,
    text: String,
    mode: Mode,
    via_stmt: Option<StmtMust>,
  ) -> Result<paths::PathId, CompileError> {
    let id = self.paths.get_id_owned(clean);
    if let Some(stmt) = via_stmt {
      self.import_targets.entry(stmt).or_default().push(id);
    }
    if let Some(pos) = self.loading.iter().position(|&x| x == id) {
      let mut chain = String::new();
      for &p in &self.loading[pos..] {
        chain.push_str(&self.paths.get_path(p).as_path().display().to_string());
        chain.push_str(" -> ");
      }
      chain.push_str(&self.paths.get_path(id).as_path().display().to_string());
      return Err(CompileError {
        message: format!("import cycle: {chain}"),
        path: Some(self.paths.get_path(id).as_path().to_owned()),
        line: None,
        column: None,
        status: Status::Import,
      });
    }
    if self.files.contains_key(&id) {
      log::debug!("import cache hit for {}", self.paths.get_path(id).as_path().display());
      return Ok(id);
    }
    let lex = sass_lex::get(&text, mode);
    if let Some(e) = lex.errors.first() {
      return Err(self.syntax_error(id, &text, e.idx, e.to_string()));
    }
    let parse = sass_parse::get(&mut self.ars, &mut self.ptrs, id, &lex.tokens);
    if let Some(e) = parse.errors.first() {
      let idx = usize::from(e.range.start());
      return Err(self.syntax_error(id, &text, idx, e.to_string()));
    }
    let mut imports = collect_imports(&self.ars.stmts, &parse.top);
    imports.reverse();
    self.files.insert(id, sass_eval::File { top: parse.top });
    self.pos_dbs.insert(id, text_pos::PositionDb::new(&text));
    self.sources.insert(id, text);
    self.included.push(id);
    self.loading.push(id);
    self.work.push(Frame { file: id, imports });
    Ok(id)
  }

  fn syntax_error(
    &self,
    id: paths::PathId,
    text: &str,
    idx: usize,
    message: String,
  ) -> CompileError {
    let db = text_pos::PositionDb::new(text);
    let ts = text_size::TextSize::new(u32::try_from(idx).unwrap_or(0));
    let pos = db.range_utf16(text_size::TextRange::empty(ts));
    CompileError {
      message,
      path: Some(self.paths.get_path(id).as_path().to_owned()),
      line: pos.map(|r| r.start.line + 1),
      column: pos.map(|r| r.start.col + 1),
      status: Status::Syntax,
    }
  }

  /// Relative provider paths resolve against the importing file's directory.
  fn join_from(&self, from: paths::PathId, p: &std::path::Path) -> paths::CleanPathBuf {
    let from = self.paths.get_path(from);
    match from.parent() {
      Some(parent) => parent.join(p),
      None => from.join(p),
    }
  }

  fn finish(&mut self) -> Result<CompileResult, CompileError> {
    let root = self.root.expect("root should be loaded before finish");
    let fmt = sass_val::Fmt {
      precision: self.opts.precision,
      compressed: self.opts.style == sass_emit::Style::Compressed,
    };
    let top = self.files.get(&root).expect("root should be parsed").top.clone();
    let items = {
      let mut cx = sass_eval::Cx {
        strings: &mut self.ars.strings,
        exprs: &self.ars.exprs,
        stmts: &self.ars.stmts,
        ptrs: &self.ptrs,
        files: &self.files,
        import_targets: &self.import_targets,
        pos_dbs: &self.pos_dbs,
        fmt,
      };
      sass_eval::get(&mut cx, &top)
    };
    let items = match items {
      Ok(x) => x,
      Err(e) => return Err(self.eval_error(&e)),
    };
    let emit_opts = sass_emit::Options {
      style: self.opts.style,
      source_comments: self.opts.source_comments,
      paths: &self.paths,
      root: self.root_dir.as_ref().map(paths::CleanPathBuf::as_clean_path),
    };
    let mut css = sass_emit::get(&items, &emit_opts);
    let included_files: Vec<std::path::PathBuf> =
      self.included.iter().map(|&id| self.paths.get_path(id).as_path().to_owned()).collect();
    let source_map = self.source_map(&included_files);
    if let Some(json) = &source_map {
      if let Some(url) = self.map_url(json) {
        if !css.ends_with('\n') {
          css.push('\n');
        }
        css.push_str(&format!("/*# sourceMappingURL={url} */\n"));
      }
    }
    Ok(CompileResult { css, source_map, included_files })
  }

  fn source_map(&self, included: &[std::path::PathBuf]) -> Option<String> {
    if self.opts.source_map.is_none() && !self.opts.source_map_embed {
      return None;
    }
    let sources: Vec<String> = included.iter().map(|p| p.display().to_string()).collect();
    let sources_content = self.opts.source_map_contents.then(|| {
      self.included.iter().map(|id| self.sources.get(id).cloned().unwrap_or_default()).collect()
    });
    let map = sass_emit::SourceMap { file: None, sources, sources_content };
    Some(map.to_json())
  }

  fn map_url(&self, json: &str) -> Option<String> {
    if self.opts.omit_source_map_url {
      return None;
    }
    if self.opts.source_map_embed {
      return Some(format!("data:application/json;charset=utf-8,{}", percent_encode(json)));
    }
    self.opts.source_map.as_ref().map(|p| p.display().to_string())
  }

  fn eval_error(&self, e: &sass_eval::error::Error) -> CompileError {
    let message = e.display(&self.ars.strings).to_string();
    let src = match e.at {
      sass_eval::error::At::Expr(x) => self.ptrs.exprs.get(x).copied(),
      sass_eval::error::At::Stmt(s) => self.ptrs.stmts.get(s).copied(),
    };
    let (path, line, column) = match src {
      Some(src) => {
        let path = self.paths.get_path(src.file).as_path().to_owned();
        match self.pos_dbs.get(&src.file).and_then(|db| db.range_utf16(src.range)) {
          Some(r) => (Some(path), Some(r.start.line + 1), Some(r.start.col + 1)),
          None => (Some(path), None, None),
        }
      }
      None => (None, None, None),
    };
    CompileError { message, path, line, column, status: Status::Eval }
  }
}

/// Collects `@import` directives in source order, including ones nested in
/// blocks.
fn collect_imports(stmts: &StmtArena, top: &[StmtMust]) -> Vec<StmtMust> {
  let mut out = Vec::<StmtMust>::new();
  go(stmts, top, &mut out);
  out
}

fn go(stmts: &StmtArena, list: &[StmtMust], out: &mut Vec<StmtMust>) {
  for &s in list {
    match &stmts[s] {
      StmtData::Import { .. } => out.push(s),
      StmtData::RuleBlock { body, .. }
      | StmtData::MixinDef { body, .. }
      | StmtData::FunctionDef { body, .. }
      | StmtData::Each { body, .. }
      | StmtData::For { body, .. }
      | StmtData::While { body, .. } => go(stmts, body, out),
      StmtData::If { branches, else_body } => {
        for b in branches {
          go(stmts, &b.body, out);
        }
        if let Some(body) = else_body {
          go(stmts, body, out);
        }
      }
      StmtData::Include { content, .. } => {
        if let Some(body) = content {
          go(stmts, body, out);
        }
      }
      StmtData::AtRule { body, .. } => {
        if let Some(body) = body {
          go(stmts, body, out);
        }
      }
      StmtData::Declaration { .. }
      | StmtData::VariableAssign { .. }
      | StmtData::Content
      | StmtData::Return(_)
      | StmtData::CssImport { .. }
      | StmtData::Extend { .. }
      | StmtData::Warn(_)
      | StmtData::Debug(_)
      | StmtData::Error(_)
      | StmtData::LoudComment(_) => {}
    }
  }
}

fn percent_encode(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for b in s.bytes() {
    match b {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
        out.push(char::from(b));
      }
      _ => out.push_str(&format!("%{b:02X}")),
    }
  }
  out
}
