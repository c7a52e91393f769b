//! Convert a Viatom oximetry dump to CSV.
//!
//! ```bash
//! viatom night.dat night.csv
//! viatom night.dat night.csv --timezone local --summary night.yaml
//! RUST_LOG=viatom=debug viatom night.dat night.csv
//! ```
//!
//! Exits with status 1 and a one-line diagnostic on any failure, including missing
//! or malformed arguments. No output file is left behind when conversion fails.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use viatom::output::{commit_all, stage_csv_file, stage_summary_file};
use viatom::{ConverterConfig, RecordingReader, TimestampPolicy, ViatomError};

#[derive(Parser, Debug)]
#[command(name = "viatom", version)]
#[command(about = "Convert Viatom pulse-oximetry dumps to CSV")]
struct Args {
    /// Viatom dump to read
    input: PathBuf,

    /// CSV file to write
    output: PathBuf,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How to read the recording start time: utc or local
    #[arg(long, value_name = "POLICY")]
    timezone: Option<TimestampPolicy>,

    /// Keep double-sampled records instead of collapsing them
    #[arg(long)]
    no_dedup: bool,

    /// Field delimiter
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Quote every field
    #[arg(long)]
    quote_all: bool,

    /// Also write a YAML summary of the recording
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are the only parse outcomes printed to stdout.
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let viatom_error = e.downcast_ref::<ViatomError>();
            let kind = viatom_error.map(ViatomError::kind).unwrap_or("Error");
            eprintln!("{}: {:#}", kind, e);

            for suggestion in viatom_error.map(ViatomError::recovery_suggestions).unwrap_or_default() {
                debug!("hint: {}", suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;
    debug!(?config, "Resolved configuration");

    let recording = RecordingReader::new(config.decode.clone())
        .open(&args.input)
        .with_context(|| format!("decoding {}", args.input.display()))?;

    // Render every output before publishing any, so a failure leaves none behind.
    let mut staged = vec![
        stage_csv_file(&args.output, &recording, &config.output)
            .with_context(|| format!("writing {}", args.output.display()))?,
    ];
    if let Some(summary) = &args.summary {
        staged.push(
            stage_summary_file(summary, &recording)
                .with_context(|| format!("writing summary {}", summary.display()))?,
        );
    }
    commit_all(staged).context("publishing output files")?;

    info!("Converted {} samples to {}", recording.len(), args.output.display());
    Ok(())
}

/// Load the configuration file, if any, and apply command line overrides.
fn resolve_config(args: &Args) -> Result<ConverterConfig> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::load(path)?,
        None => ConverterConfig::default(),
    };

    if let Some(policy) = args.timezone {
        config.decode.timestamps = policy;
    }
    if args.no_dedup {
        config.decode.deduplicate = false;
    }
    if let Some(delimiter) = args.delimiter {
        config.output.delimiter = delimiter;
    }
    if args.quote_all {
        config.output.quote_all = true;
    }

    config.validate()?;
    Ok(config)
}
