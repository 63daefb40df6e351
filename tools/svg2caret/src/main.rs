// Batch converter: annotated slide SVGs to Caret files.
//
// Usage:
//   svg2caret [--spacing <f64>] [-o <dir>] <input.svg>...
//
// For each input writes <stem>.contours, <stem>.contour_cells and
// <stem>.contour_cell_color into <dir>, or next to the input.

use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process;
use svg_caret::{convert_svg_file, ConvertOptions};

#[derive(Debug)]
struct Args {
    options: ConvertOptions,
    out_dir: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {:#}", e);
            print_usage();
            process::exit(2);
        }
    };

    let mut failures = 0;
    for input in &args.inputs {
        if let Err(e) = convert_one(input, &args) {
            log::error!("{:#}", e);
            failures += 1;
        }
    }

    if failures > 0 {
        log::error!("{} of {} documents failed", failures, args.inputs.len());
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("svg2caret: convert annotated slide SVGs to Caret contour and cell files");
    eprintln!();
    eprintln!("Usage: svg2caret [--spacing <f64>] [-o <dir>] <input.svg>...");
    eprintln!();
    eprintln!("  --spacing <f64>    depth-to-Z scale factor (default 6.0)");
    eprintln!("  -o, --out-dir <dir>  output directory (default: next to each input)");
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut options = ConvertOptions::default();
    let mut out_dir = None;
    let mut inputs = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--spacing" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("--spacing needs a value"))?;
                let spacing: f64 = value
                    .parse()
                    .with_context(|| format!("invalid spacing '{}'", value))?;
                if !spacing.is_finite() || spacing < 0.0 {
                    bail!("spacing must be a finite, non-negative number: '{}'", value);
                }
                options = options.with_spacing(spacing);
                i += 2;
            }
            "-o" | "--out-dir" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("{} needs a value", args[i]))?;
                out_dir = Some(PathBuf::from(value));
                i += 2;
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option: {}", flag),
            input => {
                inputs.push(PathBuf::from(input));
                i += 1;
            }
        }
    }

    if inputs.is_empty() {
        bail!("no input files");
    }
    Ok(Args {
        options,
        out_dir,
        inputs,
    })
}

fn convert_one(input: &Path, args: &Args) -> Result<()> {
    let files = convert_svg_file(input, &args.options)
        .with_context(|| format!("converting {}", input.display()))?;

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("no file stem in {}", input.display()))?;
    let dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let mut write_errors = 0;
    for (path, result) in files.write_to(&dir, stem) {
        match result {
            Ok(()) => log::info!("wrote {}", path.display()),
            Err(e) => {
                log::error!("{}", e);
                write_errors += 1;
            }
        }
    }
    if write_errors > 0 {
        bail!("{}: {} output files not written", input.display(), write_errors);
    }
    Ok(())
}
