//! The import provider protocol and the suspendable pump.

use crate::check::mem_fs;
use sass_compile::{
  Compilation, CompileError, CompileResult, ImportAnswer, Input, Options, ProvidedFile, Step,
};

fn text_input(s: &str) -> Input {
  Input::Text { text: s.to_owned(), path: Some(std::path::PathBuf::from("/main.scss")) }
}

#[test]
fn provider_supplies_contents() {
  let fs = mem_fs(&[]);
  let input = text_input("@import \"virtual\";\na { x: y; }");
  let mut provider = |req: &sass_compile::ImportRequest| {
    assert_eq!("virtual", req.url);
    ImportAnswer::Files(vec![ProvidedFile {
      path: std::path::PathBuf::from("/virtual.scss"),
      contents: Some("b { c: d; }".to_owned()),
    }])
  };
  let result = sass_compile::compile_with(&fs, input, Options::default(), &mut provider)
    .expect("should compile");
  assert_eq!("b {\n  c: d;\n}\n\na {\n  x: y;\n}\n", result.css);
}

#[test]
fn provider_returns_several_files() {
  let fs = mem_fs(&[]);
  let input = text_input("@import \"both\";");
  let mut provider = |_: &sass_compile::ImportRequest| {
    ImportAnswer::Files(vec![
      ProvidedFile {
        path: std::path::PathBuf::from("/one.scss"),
        contents: Some("a { x: 1; }".to_owned()),
      },
      ProvidedFile {
        path: std::path::PathBuf::from("/two.scss"),
        contents: Some("b { y: 2; }".to_owned()),
      },
    ])
  };
  let result = sass_compile::compile_with(&fs, input, Options::default(), &mut provider)
    .expect("should compile");
  assert_eq!("a {\n  x: 1;\n}\n\nb {\n  y: 2;\n}\n", result.css);
}

#[test]
fn provider_defers_to_filesystem() {
  let fs = mem_fs(&[("/_disk.scss", "a { from: disk; }")]);
  let input = text_input("@import \"disk\";");
  let result = sass_compile::compile_with(&fs, input, Options::default(), &mut |_| {
    ImportAnswer::UseDefault
  })
  .expect("should compile");
  assert_eq!("a {\n  from: disk;\n}\n", result.css);
}

#[test]
fn provider_not_found_is_fatal() {
  let fs = mem_fs(&[("/_exists.scss", "a { x: y; }")]);
  let input = text_input("@import \"exists\";");
  let e = sass_compile::compile_with(&fs, input, Options::default(), &mut |_| {
    ImportAnswer::NotFound
  })
  .expect_err("expected an error");
  assert!(e.message.contains("not found"), "bad message: {}", e.message);
  assert_eq!(3, e.status.code());
}

#[test]
fn provided_contents_can_import() {
  let fs = mem_fs(&[("/_leaf.scss", "$c: red;")]);
  let input = text_input("@import \"virtual\";\na { color: $c; }");
  let mut provider = |req: &sass_compile::ImportRequest| {
    if req.url == "virtual" {
      ImportAnswer::Files(vec![ProvidedFile {
        path: std::path::PathBuf::from("/virtual.scss"),
        contents: Some("@import \"leaf\";".to_owned()),
      }])
    } else {
      ImportAnswer::UseDefault
    }
  };
  let result = sass_compile::compile_with(&fs, input, Options::default(), &mut provider)
    .expect("should compile");
  assert_eq!("a {\n  color: red;\n}\n", result.css);
}

fn pump_to_import(c: &mut Compilation, fs: &paths::MemoryFileSystem) -> String {
  match c.step(fs) {
    Step::NeedImport(req) => req.url,
    Step::Done(res) => panic!("expected an import request, got {res:?}"),
  }
}

fn pump_to_done(
  c: &mut Compilation,
  fs: &paths::MemoryFileSystem,
) -> Result<CompileResult, CompileError> {
  match c.step(fs) {
    Step::Done(res) => *res,
    Step::NeedImport(req) => panic!("unexpected import request for {:?}", req.url),
  }
}

/// A deferred answer on one compilation never blocks an unrelated one: both
/// suspend, then resolve in the opposite order.
#[test]
fn interleaved_compilations() {
  let fs = mem_fs(&[]);
  let mut c1 = Compilation::new(text_input("@import \"x\";"), Options::default());
  let mut c2 = Compilation::new(
    Input::Text {
      text: "@import \"y\";".to_owned(),
      path: Some(std::path::PathBuf::from("/other.scss")),
    },
    Options::default(),
  );
  assert_eq!("x", pump_to_import(&mut c1, &fs));
  assert_eq!("y", pump_to_import(&mut c2, &fs));
  // answer the second one first
  c2.provide(
    &fs,
    ImportAnswer::Files(vec![ProvidedFile {
      path: std::path::PathBuf::from("/y.scss"),
      contents: Some("b { n: 2; }".to_owned()),
    }]),
  );
  let r2 = pump_to_done(&mut c2, &fs).expect("c2 should compile");
  assert_eq!("b {\n  n: 2;\n}\n", r2.css);
  c1.provide(
    &fs,
    ImportAnswer::Files(vec![ProvidedFile {
      path: std::path::PathBuf::from("/x.scss"),
      contents: Some("a { n: 1; }".to_owned()),
    }]),
  );
  let r1 = pump_to_done(&mut c1, &fs).expect("c1 should compile");
  assert_eq!("a {\n  n: 1;\n}\n", r1.css);
}

/// Dropping a compilation mid-import releases everything; a fresh
/// compilation of the same input is unaffected.
#[test]
fn cancellation_mid_import() {
  let fs = mem_fs(&[("/_dep.scss", "a { x: y; }")]);
  let mut c = Compilation::new(text_input("@import \"dep\";"), Options::default());
  let _ = pump_to_import(&mut c, &fs);
  drop(c);
  let result = sass_compile::compile_with(
    &fs,
    text_input("@import \"dep\";"),
    Options::default(),
    &mut |_| ImportAnswer::UseDefault,
  )
  .expect("should compile");
  assert_eq!("a {\n  x: y;\n}\n", result.css);
}

/// The same import request keeps being surfaced until it is answered.
#[test]
fn step_reissues_request_until_answered() {
  let fs = mem_fs(&[("/_dep.scss", "a { x: y; }")]);
  let mut c = Compilation::new(text_input("@import \"dep\";"), Options::default());
  assert_eq!("dep", pump_to_import(&mut c, &fs));
  assert_eq!("dep", pump_to_import(&mut c, &fs));
  c.provide(&fs, ImportAnswer::UseDefault);
  let result = pump_to_done(&mut c, &fs).expect("should compile");
  assert_eq!("a {\n  x: y;\n}\n", result.css);
}
