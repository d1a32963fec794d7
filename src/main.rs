//! Pacmacro admin console.
//!
//! Reads admin commands from stdin, one per line, and prints each reply as
//! JSON on stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pacmacro_state::command::{execute, parse_command, AdminCommand};
use pacmacro_state::{AdminConfig, AdminError, AdminManager, SharedAdmin};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON configuration file; the built-in board is used when omitted
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log filter
    #[clap(short, long)]
    log_filter: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AdminConfig::load(path)?,
        None => AdminConfig::default(),
    };

    let filter = args
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| config.log_filter.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(io::stderr)
        .init();

    let admin = SharedAdmin::new(AdminManager::from_config(&config));
    info!(
        pacdots = config.board.pacdots.len(),
        "admin console ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = parse_command(&line);
        let reply = command
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|c| execute(&admin, c));

        match reply {
            Ok(value) => writeln!(stdout, "{}", value)?,
            Err(error) => {
                warn!(%error, "admin command failed");
                writeln!(stdout, "{}", error_reply(&error))?;
            }
        }

        if command == Ok(AdminCommand::Quit) {
            break;
        }
    }

    Ok(())
}

fn error_reply(error: &AdminError) -> serde_json::Value {
    let kind = if error.is_conflict() {
        "conflict"
    } else {
        "bad_request"
    };
    serde_json::json!({"error": kind, "message": error.to_string()})
}
