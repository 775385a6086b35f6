mod render;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use nosj_core::{DEFAULT_MAX_DEPTH, ParseConfig, RenderConfig, parse_document, render_document};
use nosj_diagnostics::report::EXIT_STATUS;
use tracing_subscriber::EnvFilter;

use crate::render::report_failure;

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "nosj",
    version,
    about = "Decode a NOSJ document and print its key-value trace"
)]
struct Cli {
    /// Deepest map nesting accepted; the top-level map counts as 1.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// NOSJ input file.
    file: PathBuf,
}

/// Wrong number of input files, or an unrecognized flag.
#[derive(Debug, thiserror::Error)]
#[error("Usage: nosj [--max-depth N] <inputfile>")]
pub(crate) struct UsageError;

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "invalid invocation");
            fail(&anyhow::Error::new(UsageError));
        }
    };

    let out = match decode_file(&cli.file, cli.max_depth) {
        Ok(out) => out,
        Err(e) => fail(&e),
    };

    // Only a fully rendered document reaches stdout.
    if let Err(e) = write_stdout(&out) {
        fail(&e);
    }
}

/// Read, parse, and render `path` into an in-memory buffer.
fn decode_file(path: &Path, max_depth: usize) -> Result<Vec<u8>> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let map = parse_document(&input, &ParseConfig::default().with_max_depth(max_depth))?;
    let out = render_document(&map, &RenderConfig::default().with_max_depth(max_depth))?;
    Ok(out)
}

fn write_stdout(out: &[u8]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(out)
        .and_then(|()| stdout.flush())
        .context("failed to write output")
}

fn fail(err: &anyhow::Error) -> ! {
    report_failure(err);
    process::exit(EXIT_STATUS);
}

/// Logging stays off unless `NOSJ_LOG` is set, so stderr carries nothing but
/// the error line by default.
fn init_tracing() {
    if std::env::var_os("NOSJ_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_env("NOSJ_LOG"))
            .with_writer(io::stderr)
            .init();
    }
}
