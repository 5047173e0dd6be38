//! Cellgrid - load delimited text into a sheet and report its wrapped layout

mod default_config;
mod ingest;
mod logging;
mod report;

use anyhow::{Context, Result, bail};
use cellgrid_core::{EngineConfig, Sheet};
use std::env;
use std::io::Read;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: cellgrid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Delimited text file to load (default: stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>       Load engine settings from a TOML file");
    eprintln!("  -w, --width <N>           Column width used for wrapping");
    eprintln!("  -d, --delimiter <C>       Field delimiter (default: ','; 'tab' for tabs)");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    width: Option<f32>,
    delimiter: char,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        file_path: None,
        config_path: None,
        width: None,
        delimiter: ',',
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_path = Some(PathBuf::from(&args[i]));
            }
            "-w" | "--width" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --width requires a value");
                    std::process::exit(1);
                }
                match args[i].parse::<f32>() {
                    Ok(width) if width.is_finite() && width >= 0.0 => options.width = Some(width),
                    _ => {
                        eprintln!("Error: Invalid width: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            "-d" | "--delimiter" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --delimiter requires a value");
                    std::process::exit(1);
                }
                match ingest::parse_delimiter(&args[i]) {
                    Some(delimiter) => options.delimiter = delimiter,
                    None => {
                        eprintln!("Error: Invalid delimiter: {}", args[i]);
                        std::process::exit(1);
                    }
                }
            }
            arg if arg.starts_with('-') && arg != "-" => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    logging::init();

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    let config = load_config(options.config_path.as_ref())?;

    let content = match &options.file_path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let rows = ingest::parse_delimited(&content, options.delimiter);
    let mut sheet = Sheet::from_config(&config);
    sheet.load_bulk(rows);

    let width = options.width.unwrap_or(config.layout.default_column_width);
    let report = report::render(sheet.state(), &config.layout, width)
        .context("failed to render report")?;
    print!("{}", report);
    Ok(())
}

/// An explicit `--config` must load; the default location is best-effort.
fn load_config(explicit: Option<&PathBuf>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("config file not found: {}", path.display());
        }
        return EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }

    let Some(path) = default_config::default_config_path() else {
        return Ok(EngineConfig::default());
    };
    let (config, warnings) = EngineConfig::load_or_default(&path);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(config)
}
