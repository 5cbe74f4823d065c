//! xcc Compiler Driver
//!
//! Compiles the program text given on the command line and prints the
//! assembly listing. Nothing is written unless compilation succeeds.

use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use xcc_codegen::{assign_lvar_offsets, compile};
use xcc_common::{CompilerError, Diagnostic};
use xcc_frontend::Frontend;

#[derive(Parser)]
#[command(name = "xcc")]
#[command(about = "Compile a small C subset to x86-64 assembly")]
#[command(version = "0.1.0")]
struct Cli {
    /// Program text to compile
    source: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stage to print
    #[arg(long, value_enum, default_value_t = Emit::Asm)]
    emit: Emit,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// x86-64 assembly (AT&T syntax)
    Asm,
    /// Token list as JSON
    Tokens,
    /// Typed AST with frame layout as JSON
    Ast,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = match render(&cli.source, cli.emit) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}", Diagnostic::new(e, &cli.source));
            std::process::exit(1);
        }
    };

    if let Err(e) = write_output(&text, cli.output.as_deref()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` controls logging; `--verbose` forces debug level
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn render(source: &str, emit: Emit) -> Result<String, CompilerError> {
    match emit {
        Emit::Asm => {
            let asm = compile(source)?;
            debug!("generated {} lines of assembly", asm.lines().count());
            Ok(asm)
        }
        Emit::Tokens => to_json(&Frontend::tokenize_source(source)?),
        Emit::Ast => {
            let mut unit = Frontend::analyze_source(source)?;
            assign_lvar_offsets(&mut unit);
            to_json(&unit)
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CompilerError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| CompilerError::internal(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn write_output(text: &str, path: Option<&Path>) -> Result<(), CompilerError> {
    match path {
        Some(path) => fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
