use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gateway_bench::{BenchConfig, HttpGateway};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Times sequential GET requests against a gateway and charts the response times.
///
/// Benchmark parameters live in the config file; see `--print-config` for the defaults.
#[derive(Parser, Debug)]
#[command(name = "gateway-bench")]
struct Cli {
    /// TOML config file. Built-in defaults are used when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not open the chart in an image viewer.
    #[arg(long)]
    no_display: bool,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BenchConfig::default(),
    };
    if cli.no_display {
        config.interactive_display = false;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let progress = ProgressBar::new(config.request_count as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len}")
    {
        progress.set_style(style);
    }

    let measurements = gateway_bench::run(&config, &mut HttpGateway, &progress)
        .with_context(|| format!("Benchmark of {} failed", config.target_url()))?;

    println!("Results saved to {}", config.csv_path.display());
    println!(
        "Chart saved to {} ({} requests)",
        config.image_path.display(),
        measurements.len()
    );
    Ok(())
}
