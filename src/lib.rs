pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

pub use processor::{Context, DecodeError, Options, SymbolTable};

use anyhow::{Context as _, anyhow};
use clap::Parser;
use std::io::{self, Write};

use crate::cli::{Cli, Format};
use crate::model::RawConfig;

pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);
    execute(&args, &mut io::stdout().lock())
}

/// Configures, decodes and writes the result for `args` to `out`.
///
/// In text mode nothing is written when decoding fails; the returned error
/// carries the rendered message instead.
pub fn execute<W: Write>(args: &Cli, out: &mut W) -> anyhow::Result<()> {
    // 1. ── Configure ──────────────────────────────────────────────────
    let config = match &args.config {
        Some(path) => parser::load_file(path)?,
        None => RawConfig::default(),
    };
    let ctx = config
        .into_context()
        .with_context(|| "Building symbol table")?;

    // 2. ── Decode ─────────────────────────────────────────────────────
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Reading {}", args.input.display()))?;
    let result = ctx.run_bytes(&bytes);

    // 3. ── Write outputs ──────────────────────────────────────────────
    match args.format {
        Format::Text => {
            if let Ok(output) = &result {
                writer::text::emit(output, out).with_context(|| "Writing output")?;
            }
        }
        Format::Json => {
            writer::json::emit(&result, out).with_context(|| "Writing report")?;
        }
    }

    result.map(drop).map_err(|err| {
        let source = String::from_utf8_lossy(&bytes);
        anyhow!(writer::text::render_error(&err, &source))
            .context(format!("Decoding {}", args.input.display()))
    })
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // a second subscriber (tests, embedding hosts) is not an error
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
