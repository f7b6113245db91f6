//! A CLI for compiling Sass to CSS.

use std::process::ExitCode;

fn main() -> ExitCode {
  let args = match get_args() {
    Err(e) => {
      println!("error parsing args: {e}");
      return ExitCode::FAILURE;
    }
    Ok(None) => return ExitCode::SUCCESS,
    Ok(Some(x)) => x,
  };
  let n = run(args);
  if n == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

struct Args {
  opts: sass_compile::Options,
  output: Option<std::path::PathBuf>,
  json_errors: bool,
  files: Vec<std::ffi::OsString>,
}

fn get_args() -> Result<Option<Args>, pico_args::Error> {
  env_logger::init();
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    println!("usage:");
    println!("  sass-cli [<option>...] <file>...");
    println!();
    println!("options:");
    println!("  -h, --help");
    println!("    show this help");
    println!("  -o, --output <file>");
    println!("    write css to <file> instead of stdout");
    println!("  --style <style>");
    println!("    output style, 'expanded' (default) or 'compressed'");
    println!("  --include-path <dirs>");
    println!("    comma-separated extra import search roots");
    println!("  --precision <n>");
    println!("    decimal digits for numbers, default 5");
    println!("  --source-comments");
    println!("    annotate each rule with its source line");
    println!("  --source-map <file>");
    println!("    emit a source map next to the css");
    println!("  --json-errors");
    println!("    print errors as json");
    println!();
    return Ok(None);
  }
  let style: Option<String> = args.opt_value_from_str("--style")?;
  let style = match style.as_deref() {
    Some("compressed") => sass_compile::Style::Compressed,
    _ => sass_compile::Style::Expanded,
  };
  let include_paths: Option<String> = args.opt_value_from_str("--include-path")?;
  let include_paths = include_paths
    .iter()
    .flat_map(|x| x.split(','))
    .map(std::path::PathBuf::from)
    .collect();
  let precision: Option<usize> = args.opt_value_from_str("--precision")?;
  let source_comments = args.contains("--source-comments");
  let source_map: Option<std::path::PathBuf> = args.opt_value_from_str("--source-map")?;
  let json_errors = args.contains("--json-errors");
  let output: Option<std::path::PathBuf> = args.opt_value_from_str(["-o", "--output"])?;
  let opts = sass_compile::Options {
    style,
    include_paths,
    precision: precision.unwrap_or(5),
    source_comments,
    source_map,
    ..sass_compile::Options::default()
  };
  let files = args.finish();
  Ok(Some(Args { opts, output, json_errors, files }))
}

fn run(args: Args) -> usize {
  if args.files.is_empty() {
    println!("no input files");
    return 1;
  }
  let mut ret = 0usize;
  for file in &args.files {
    let Some(file) = file.to_str() else {
      println!("{}: not valid UTF-8", file.to_string_lossy());
      ret += 1;
      continue;
    };
    let input = sass_compile::Input::File(std::path::PathBuf::from(file));
    match sass_compile::compile(input, args.opts.clone()) {
      Ok(result) => {
        if let Err(e) = write_output(&args, &result) {
          println!("{file}: {e}");
          ret += 1;
        }
      }
      Err(e) => {
        if args.json_errors {
          println!("{}", e.json());
        } else {
          println!("{e}");
        }
        ret += 1;
      }
    }
  }
  ret
}

fn write_output(args: &Args, result: &sass_compile::CompileResult) -> std::io::Result<()> {
  match &args.output {
    Some(out) => std::fs::write(out, result.css.as_bytes())?,
    None => print!("{}", result.css),
  }
  if let (Some(map_path), Some(map)) = (&args.opts.source_map, &result.source_map) {
    std::fs::write(map_path, map.as_bytes())?;
  }
  Ok(())
}
