use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use feed_reader::api::config::ApiConfig;
use feed_reader::api::start_server;
use feed_reader::url_parser::{normalize_url, validate_fetch_target};
use feed_reader::utils::logger::init_logger;

#[derive(Parser, Debug)]
#[command(name = "feed-reader", version, about = "Feed URL normalization service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the normalized form of each input
    Normalize {
        /// Also check that each result is a fetchable http(s) URL
        #[arg(long)]
        strict: bool,

        /// Read inputs from a file, one per line (blank lines and # comments skipped)
        #[arg(long, value_name = "FILE")]
        batch: Option<PathBuf>,

        /// URLs (or anything a user might type as one)
        inputs: Vec<String>,
    },

    /// Run the HTTP API
    Serve {
        /// Config file (TOML, YAML, JSON, ...); FEED_READER_* env vars override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Normalize {
            strict,
            batch,
            inputs,
        } => {
            let all = collect_inputs(inputs, batch.as_deref())?;
            let failed = normalize_all(&all, strict, &mut io::stdout().lock())?;
            if failed > 0 {
                eprintln!("{} of {} inputs are not fetchable URLs", failed, all.len());
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { config, host, port } => {
            let mut config = ApiConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            init_logger(config.log_dir.as_deref())?;
            actix_web::rt::System::new().block_on(start_server(config))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Positional inputs first, then the batch file's entries
fn collect_inputs(inputs: Vec<String>, batch: Option<&Path>) -> Result<Vec<String>> {
    let mut all = inputs;
    if let Some(path) = batch {
        all.extend(read_batch(path)?);
    }
    Ok(all)
}

fn read_batch(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim().starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Writes one normalized URL per input; returns how many failed `--strict` validation
fn normalize_all(inputs: &[String], strict: bool, out: &mut impl Write) -> Result<usize> {
    let mut failed = 0;

    for input in inputs {
        let normalized = normalize_url(input);
        writeln!(out, "{}", normalized)?;

        if strict {
            if let Err(e) = validate_fetch_target(&normalized) {
                eprintln!("{:?}: {:#}", input, e);
                failed += 1;
            }
        }
    }

    Ok(failed)
}
