//! Infrastructure intent CLI: resolve operator commands from stdin.
//!
//! Reads one command per line and writes one JSON document per line to
//! stdout. Logs go to stderr as JSON.

use std::io::{BufRead, Write};

use tracing_subscriber::EnvFilter;

use ii_cli::config::CliConfig;
use ii_cli::session::Session;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ii-cli starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => CliConfig::from_file(&path)?.with_env_overrides(),
        None => CliConfig::from_env(),
    };
    let catalog = config.load_catalog()?;
    let session = Session::new(catalog, config.history_limit);

    // ── Line loop ───────────────────────────────────────────────
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let response = session.handle_line(&line)?;
        writeln!(stdout, "{response}")?;
        stdout.flush()?;
    }

    tracing::info!(recorded = session.history().len(), "stdin closed, exiting");
    Ok(())
}
