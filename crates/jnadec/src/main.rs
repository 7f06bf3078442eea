//! The jnade translator CLI.
//!
//! Provides the `jnadec` command with the following subcommands:
//!
//! - `jnadec translate <file>` - Translate one Java file to Nadeshiko text
//! - `jnadec batch <dir>` - Translate every `.java` file under a directory
//! - `jnadec tokens <file>` - Dump the token stream as JSON lines
//!
//! Options:
//! - `--output` - Write the translation to a file instead of stdout
//! - `--out-dir` - Mirror batch outputs under another directory
//! - `--config` - Read settings from this file instead of `./jnade.toml`
//! - `--json` - Output diagnostics as JSON (one object per line)
//! - `--no-color` - Disable colorized output
//! - `-v` - More logging (repeat for more); `RUST_LOG` overrides

mod diagnostics;
mod discovery;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use jnade_translate::config::CONFIG_FILE;
use jnade_translate::TranslateConfig;
use tracing_subscriber::EnvFilter;

use crate::diagnostics::DiagnosticOptions;

#[derive(Parser)]
#[command(name = "jnadec", version, about = "Translate Java to Nadeshiko sentence notation")]
struct Cli {
    /// Increase logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate one Java source file
    Translate {
        /// Path to the `.java` file
        file: PathBuf,

        /// Write the translation here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./jnade.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output diagnostics as JSON (one object per line) instead of human-readable format
        #[arg(long)]
        json: bool,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// Translate every `.java` file under a directory
    Batch {
        /// Directory to search recursively
        dir: PathBuf,

        /// Write outputs under this directory, mirroring relative paths
        #[arg(long = "out-dir")]
        out_dir: Option<PathBuf>,

        /// Configuration file (defaults to ./jnade.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output diagnostics as JSON (one object per line) instead of human-readable format
        #[arg(long)]
        json: bool,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// Print the token stream of a file, one JSON object per token
    Tokens {
        /// Path to the `.java` file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (result, json) = match cli.command {
        Commands::Translate {
            file,
            output,
            config,
            json,
            no_color,
        } => {
            let opts = DiagnosticOptions::new(json, no_color);
            let result = load_config(config.as_deref())
                .and_then(|config| translate_file(&file, output.as_deref(), &config, opts));
            (result, json)
        }
        Commands::Batch {
            dir,
            out_dir,
            config,
            json,
            no_color,
        } => {
            let opts = DiagnosticOptions::new(json, no_color);
            let result = load_config(config.as_deref())
                .and_then(|config| batch(&dir, out_dir.as_deref(), &config, opts));
            (result, json)
        }
        Commands::Tokens { file } => (dump_tokens(&file), false),
    };

    if let Err(e) = result {
        if json {
            eprintln!("{}", diagnostics::failure_json(&e));
        } else {
            eprintln!("error: {}", e);
        }
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--config`, else `jnade.toml` in the working directory, else defaults.
fn load_config(explicit: Option<&Path>) -> Result<TranslateConfig, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if !local.is_file() {
                tracing::debug!("no {CONFIG_FILE}, using defaults");
                return Ok(TranslateConfig::default());
            }
            local
        }
    };
    tracing::debug!(path = %path.display(), "loading configuration");
    TranslateConfig::from_file(&path).map_err(|e| e.to_string())
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
}

/// Parse, report any syntax errors, and translate.
fn translate_source(
    path: &Path,
    config: &TranslateConfig,
    opts: DiagnosticOptions,
) -> Result<String, String> {
    let source = read_source(path)?;
    let parse = jnade_parser::parse(&source);
    if !parse.ok() {
        diagnostics::report_parse_errors(&source, path, parse.errors(), opts);
        return Err(format!(
            "'{}' was not translated due to errors above.",
            path.display()
        ));
    }
    Ok(jnade_translate::translate_parse(&parse, &source, config).to_text())
}

fn translate_file(
    file: &Path,
    output: Option<&Path>,
    config: &TranslateConfig,
    opts: DiagnosticOptions,
) -> Result<(), String> {
    let text = translate_source(file, config, opts)?;
    match output {
        Some(out) => write_output(out, &text),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn batch(
    dir: &Path,
    out_dir: Option<&Path>,
    config: &TranslateConfig,
    opts: DiagnosticOptions,
) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("'{}' is not a directory", dir.display()));
    }
    let files = discovery::discover_java_files(dir)?;
    tracing::debug!(count = files.len(), dir = %dir.display(), "discovered sources");
    for relative in &files {
        let text = translate_source(&dir.join(relative), config, opts)?;
        let out = discovery::output_path(dir, relative, out_dir);
        write_output(&out, &text)?;
        eprintln!("  Translated: {}", out.display());
    }
    Ok(())
}

fn write_output(path: &Path, text: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    std::fs::write(path, text).map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}

fn dump_tokens(file: &Path) -> Result<(), String> {
    let source = read_source(file)?;
    let (tokens, errors) = jnade_lexer::Lexer::tokenize_with_errors(&source);
    for token in &tokens {
        let text = source
            .get(token.span.start as usize..token.span.end as usize)
            .unwrap_or_default();
        let line = serde_json::json!({
            "kind": token.kind,
            "span": token.span,
            "text": text,
        });
        println!("{line}");
    }
    for error in &errors {
        tracing::warn!(start = error.span.start, end = error.span.end, "{error}");
    }
    Ok(())
}
