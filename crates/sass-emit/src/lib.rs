//! Serializing flat rules to CSS text, and the source-map envelope.
//!
//! This is the far side of the flattener boundary: everything here consumes
//! the already-resolved [`FlatItem`] list and only decides whitespace, never
//! semantics.

use sass_val::{FlatDecl, FlatItem, FlatRule};
use std::fmt::Write as _;

/// How to lay out the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
  #[default]
  Expanded,
  Compressed,
}

/// Options affecting emission only.
#[derive(Debug)]
pub struct Options<'a> {
  pub style: Style,
  /// Emit `/* line N, path */` before each rule.
  pub source_comments: bool,
  /// For displaying paths in source comments.
  pub paths: &'a paths::Store,
  /// Paths render relative to this root when possible.
  pub root: Option<&'a paths::CleanPath>,
}

/// Writes the items as CSS.
#[must_use]
pub fn get(items: &[FlatItem], opts: &Options<'_>) -> String {
  let mut out = String::new();
  write_items(&mut out, items, opts, 0);
  if opts.style == Style::Compressed {
    let trimmed = out.trim_end().to_owned();
    out = trimmed;
    if !out.is_empty() {
      out.push('\n');
    }
  }
  out
}

fn write_items(out: &mut String, items: &[FlatItem], opts: &Options<'_>, depth: usize) {
  let mut first = true;
  for item in items {
    match item {
      FlatItem::Rule(rule) => {
        if rule.decls.is_empty() {
          continue;
        }
        blank_line(out, opts, &mut first);
        write_rule(out, rule, opts, depth);
      }
      FlatItem::AtRule { name, params, body } => {
        blank_line(out, opts, &mut first);
        write_at_rule(out, name, params, body.as_deref(), opts, depth);
      }
      FlatItem::Decls(decls) => {
        blank_line(out, opts, &mut first);
        let compressed = opts.style == Style::Compressed;
        let last = decls.len().saturating_sub(1);
        for (i, decl) in decls.iter().enumerate() {
          write_decl(out, decl, opts, depth, compressed && i == last);
        }
      }
      FlatItem::Comment(text) => {
        blank_line(out, opts, &mut first);
        indent(out, opts, depth);
        out.push_str(text);
        newline(out, opts);
      }
      FlatItem::Import(text) => {
        blank_line(out, opts, &mut first);
        indent(out, opts, depth);
        out.push_str("@import ");
        out.push_str(text);
        out.push(';');
        newline(out, opts);
      }
    }
  }
}

fn write_rule(out: &mut String, rule: &FlatRule, opts: &Options<'_>, depth: usize) {
  if opts.source_comments {
    if let Some(src) = rule.source {
      let path = opts.paths.get_path(src.path).as_path();
      let path = match opts.root {
        Some(root) => path.strip_prefix(root.as_path()).unwrap_or(path),
        None => path,
      };
      indent(out, opts, depth);
      let _ = writeln!(out, "/* line {}, {} */", src.line, path.display());
    }
  }
  indent(out, opts, depth);
  let compressed = opts.style == Style::Compressed;
  let _ = rule.selectors.write(out, compressed);
  if compressed {
    out.push('{');
  } else {
    out.push_str(" {\n");
  }
  let last = rule.decls.len().saturating_sub(1);
  for (i, decl) in rule.decls.iter().enumerate() {
    write_decl(out, decl, opts, depth + 1, compressed && i == last);
  }
  indent(out, opts, depth);
  out.push('}');
  newline(out, opts);
}

fn write_decl(out: &mut String, decl: &FlatDecl, opts: &Options<'_>, depth: usize, last: bool) {
  indent(out, opts, depth);
  out.push_str(&decl.prop);
  out.push(':');
  if opts.style != Style::Compressed {
    out.push(' ');
  }
  out.push_str(&decl.value);
  if decl.important {
    if opts.style == Style::Compressed {
      out.push_str("!important");
    } else {
      out.push_str(" !important");
    }
  }
  // the last `;` is dropped when compressed
  if !last {
    out.push(';');
  }
  if opts.style != Style::Compressed {
    out.push('\n');
  }
}

fn write_at_rule(
  out: &mut String,
  name: &str,
  params: &str,
  body: Option<&[FlatItem]>,
  opts: &Options<'_>,
  depth: usize,
) {
  indent(out, opts, depth);
  out.push('@');
  out.push_str(name);
  if !params.is_empty() {
    out.push(' ');
    out.push_str(params);
  }
  let Some(body) = body else {
    out.push(';');
    newline(out, opts);
    return;
  };
  if opts.style == Style::Compressed {
    out.push('{');
    write_items(out, body, opts, depth + 1);
    // inner items already ended without a newline
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('}');
  } else {
    out.push_str(" {\n");
    write_items(out, body, opts, depth + 1);
    indent(out, opts, depth);
    out.push_str("}\n");
  }
}

fn indent(out: &mut String, opts: &Options<'_>, depth: usize) {
  if opts.style != Style::Compressed {
    for _ in 0..depth {
      out.push_str("  ");
    }
  }
}

fn newline(out: &mut String, opts: &Options<'_>) {
  if opts.style != Style::Compressed {
    out.push('\n');
  }
}

/// In expanded mode, top-level items are separated by one blank line.
fn blank_line(out: &mut String, opts: &Options<'_>, first: &mut bool) {
  if opts.style != Style::Compressed && !*first && out.ends_with('\n') {
    out.push('\n');
  }
  *first = false;
}

/// The source-map JSON envelope. Fine-grained mappings are out of scope; the
/// envelope carries the version, the file list, and optionally the sources'
/// contents.
#[derive(Debug)]
pub struct SourceMap<'a> {
  pub file: Option<&'a str>,
  pub sources: Vec<String>,
  pub sources_content: Option<Vec<String>>,
}

impl SourceMap<'_> {
  /// Renders the map as JSON.
  #[must_use]
  pub fn to_json(&self) -> String {
    let mut map = serde_json::Map::<String, serde_json::Value>::new();
    map.insert("version".to_owned(), serde_json::json!(3));
    if let Some(file) = self.file {
      map.insert("file".to_owned(), serde_json::json!(file));
    }
    map.insert("sources".to_owned(), serde_json::json!(self.sources));
    if let Some(contents) = &self.sources_content {
      map.insert("sourcesContent".to_owned(), serde_json::json!(contents));
    }
    map.insert("names".to_owned(), serde_json::json!([]));
    map.insert("mappings".to_owned(), serde_json::json!(""));
    serde_json::Value::Object(map).to_string()
  }
}
