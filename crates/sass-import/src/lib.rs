//! Resolving an `@import` url to a file, and the provider boundary types.
//!
//! Resolution tries each search dir in order, and within a dir tries the Sass
//! candidate spellings: the literal name, the `_` partial, the `.scss` and
//! `.sass` extensions, and the `_index` forms for directories.

use paths::{CleanPath, CleanPathBuf};

/// A request for import content, handed across the provider boundary.
#[derive(Debug, Clone)]
pub struct ImportRequest {
  /// The url as written in the `@import`.
  pub url: String,
  /// The importing file.
  pub from: paths::PathId,
  /// The importing file's path, for provider display.
  pub from_path: std::path::PathBuf,
}

/// One file produced by a provider. `contents: None` means "read that path
/// from the filesystem".
#[derive(Debug, Clone)]
pub struct ProvidedFile {
  pub path: std::path::PathBuf,
  pub contents: Option<String>,
}

/// A provider's answer to an [`ImportRequest`].
#[derive(Debug, Clone)]
pub enum ImportAnswer {
  /// One or more files satisfy the import.
  Files(Vec<ProvidedFile>),
  /// Defer to the built-in filesystem resolution.
  UseDefault,
  NotFound,
}

/// Resolves the url against the dirs, trying Sass candidate spellings.
pub fn get<'a, I, F>(url: &str, dirs: I, fs: &F) -> Option<CleanPathBuf>
where
  I: Iterator<Item = &'a CleanPath>,
  F: ?Sized + paths::FileSystem,
{
  let cands = candidates(url);
  let mut dirs = dirs;
  let ret = dirs.find_map(|dir| {
    cands.iter().find_map(|cand| {
      let p = dir.join(std::path::Path::new(cand));
      fs.is_file(p.as_path()).then_some(p)
    })
  });
  match &ret {
    Some(p) => log::debug!("resolved import {url:?} to {}", p.as_path().display()),
    None => log::debug!("no file for import {url:?}"),
  }
  ret
}

/// The candidate spellings for an import url, most specific first.
#[must_use]
pub fn candidates(url: &str) -> Vec<String> {
  let (dir, name) = match url.rfind('/') {
    Some(i) => (&url[..=i], &url[i + 1..]),
    None => ("", url),
  };
  if name.ends_with(".scss") || name.ends_with(".sass") {
    if name.starts_with('_') {
      return vec![url.to_owned()];
    }
    return vec![format!("{dir}_{name}"), url.to_owned()];
  }
  let mut ret = Vec::<String>::new();
  if name.starts_with('_') {
    ret.push(format!("{url}.scss"));
    ret.push(format!("{url}.sass"));
  } else {
    ret.push(format!("{dir}_{name}.scss"));
    ret.push(format!("{url}.scss"));
    ret.push(format!("{dir}_{name}.sass"));
    ret.push(format!("{url}.sass"));
  }
  ret.push(format!("{url}/_index.scss"));
  ret.push(format!("{url}/_index.sass"));
  ret
}
