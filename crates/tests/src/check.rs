//! The test harness: compile a string (or a set of in-memory files) and
//! assert on the CSS or the error.

use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;
use sass_compile::{CompileError, CompileResult, ImportAnswer, Input, Options};

pub(crate) fn mem_fs(files: &[(&str, &str)]) -> paths::MemoryFileSystem {
  let map: FxHashMap<std::path::PathBuf, String> =
    files.iter().map(|&(p, s)| (std::path::PathBuf::from(p), s.to_owned())).collect();
  paths::MemoryFileSystem::new(map)
}

pub(crate) fn compile_files(
  files: &[(&str, &str)],
  root: &str,
  opts: Options,
) -> Result<CompileResult, CompileError> {
  init_log();
  let fs = mem_fs(files);
  let input = Input::File(std::path::PathBuf::from(root));
  sass_compile::compile_with(&fs, input, opts, &mut |_| ImportAnswer::UseDefault)
}

pub(crate) fn try_compile(s: &str) -> Result<CompileResult, CompileError> {
  compile_files(&[("/main.scss", s)], "/main.scss", Options::default())
}

pub(crate) fn compile(s: &str) -> String {
  match try_compile(s) {
    Ok(result) => result.css,
    Err(e) => panic!("compile error: {e}"),
  }
}

/// Asserts the scss compiles to exactly the css.
pub(crate) fn check(scss: &str, want: &str) {
  assert_eq!(want, compile(scss));
}

pub(crate) fn check_opts(scss: &str, opts: Options, want: &str) {
  let got = match compile_files(&[("/main.scss", scss)], "/main.scss", opts) {
    Ok(result) => result.css,
    Err(e) => panic!("compile error: {e}"),
  };
  assert_eq!(want, got);
}

/// Asserts compilation fails with a message mentioning `want`.
pub(crate) fn check_err(scss: &str, want: &str) {
  let e = try_compile(scss).expect_err("expected a compile error");
  assert!(
    e.message.contains(want),
    "error message {:?} should mention {want:?}",
    e.message
  );
}

pub(crate) fn check_files(files: &[(&str, &str)], root: &str, want: &str) {
  let got = match compile_files(files, root, Options::default()) {
    Ok(result) => result.css,
    Err(e) => panic!("compile error: {e}"),
  };
  assert_eq!(want, got);
}

pub(crate) fn check_files_err(files: &[(&str, &str)], root: &str, want: &str) {
  let e = compile_files(files, root, Options::default()).expect_err("expected a compile error");
  assert!(
    e.message.contains(want),
    "error message {:?} should mention {want:?}",
    e.message
  );
}

fn init_log() {
  static ONCE: std::sync::Once = std::sync::Once::new();
  ONCE.call_once(|| {
    let _ = env_logger::builder().is_test(true).try_init();
  });
}
