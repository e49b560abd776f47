use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sales_report::config::ReportConfig;
use sales_report::export::{export_json, write_to_file};
use sales_report::generate_report;
use sales_report::loader::read_rows_from_path;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build car-sales dashboard datasets from a CSV file",
    long_about = None
)]
struct Args {
    /// Sales CSV with Salesperson, Car Make, Car Model, Car Year, Date,
    /// Sale Price and Commission Earned columns
    input: PathBuf,

    /// JSON config file (loader limits and result sizes)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rows in the salesperson leaderboard (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    top_salespeople: Option<i64>,

    /// Rows in the model/year table (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    top_models: Option<i64>,

    /// Also emit the monthly trend with empty months filled in
    #[arg(long)]
    fill_gaps: bool,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    // Logs go to stderr; stdout carries only the JSON report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ReportConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(n) = args.top_salespeople {
        config.pipeline.leaderboard_size = n;
    }
    if let Some(n) = args.top_models {
        config.pipeline.model_year_size = n;
    }

    let rows = read_rows_from_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let report = generate_report(&rows, &config, args.fill_gaps)?;

    tracing::info!(
        records = report.data.record_count,
        checksum = %report.checksum,
        "Report generated"
    );

    match &args.output {
        Some(path) => {
            write_to_file(&report, path).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", export_json(&report)?),
    }

    Ok(())
}
