//! Compiling Sass to CSS: options, the compile entry points, and the
//! suspendable import pump.
//!
//! A [`Compilation`] owns every per-compilation table, so many may run
//! concurrently with no shared mutable state, and dropping one mid-import
//! releases everything, in-flight markers included. The only suspension
//! point is [`Step::NeedImport`]: synchronous hosts answer inline (that is
//! all [`compile`] does), asynchronous hosts answer whenever their provider
//! resolves.

mod error;
mod st;

pub use error::{CompileError, Status};
pub use st::Compilation;

pub use sass_emit::Style;
pub use sass_import::{ImportAnswer, ImportRequest, ProvidedFile};

/// What to compile.
#[derive(Debug)]
pub enum Input {
  /// Inline text, with an optional logical path for diagnostics and
  /// relative import resolution.
  Text { text: String, path: Option<std::path::PathBuf> },
  /// A file on the provided filesystem.
  File(std::path::PathBuf),
}

/// Compilation options.
#[derive(Debug, Clone)]
pub struct Options {
  pub style: Style,
  /// Treat inline text as indented syntax. Files go by extension.
  pub indented_syntax: bool,
  /// Extra search roots for imports, tried in order after the importing
  /// file's directory.
  pub include_paths: Vec<std::path::PathBuf>,
  /// Decimal digits kept on numbers.
  pub precision: usize,
  /// Emit `/* line N, path */` before each rule.
  pub source_comments: bool,
  /// Where the source map will be written, used for the footer url.
  pub source_map: Option<std::path::PathBuf>,
  pub omit_source_map_url: bool,
  pub source_map_embed: bool,
  pub source_map_contents: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      style: Style::Expanded,
      indented_syntax: false,
      include_paths: Vec::new(),
      precision: 5,
      source_comments: false,
      source_map: None,
      omit_source_map_url: false,
      source_map_embed: false,
      source_map_contents: false,
    }
  }
}

/// A successful compilation.
#[derive(Debug)]
pub struct CompileResult {
  pub css: String,
  /// The source-map JSON, when requested.
  pub source_map: Option<String>,
  /// Every file that contributed, in load order, deduplicated.
  pub included_files: Vec<std::path::PathBuf>,
}

/// One turn of the pump.
#[derive(Debug)]
pub enum Step {
  /// The compilation needs import content. Answer with
  /// [`Compilation::provide`], then call [`Compilation::step`] again.
  NeedImport(ImportRequest),
  /// The compilation finished.
  Done(Box<Result<CompileResult, CompileError>>),
}

/// Compiles with the real filesystem and built-in import resolution.
///
/// # Errors
///
/// If the compilation failed.
pub fn compile(input: Input, opts: Options) -> Result<CompileResult, CompileError> {
  let fs = paths::RealFileSystem::default();
  compile_with(&fs, input, opts, &mut |_| ImportAnswer::UseDefault)
}

/// Compiles, driving the pump with the given filesystem and provider. The
/// provider is consulted for every Sass import; answering
/// [`ImportAnswer::UseDefault`] falls back to filesystem resolution.
///
/// # Errors
///
/// If the compilation failed.
pub fn compile_with<F>(
  fs: &F,
  input: Input,
  opts: Options,
  provider: &mut dyn FnMut(&ImportRequest) -> ImportAnswer,
) -> Result<CompileResult, CompileError>
where
  F: paths::FileSystem,
{
  let mut c = Compilation::new(input, opts);
  loop {
    match c.step(fs) {
      Step::Done(res) => return *res,
      Step::NeedImport(req) => {
        let answer = provider(&req);
        c.provide(fs, answer);
      }
    }
  }
}
