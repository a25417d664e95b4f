//! Binary target for generating a raw-minute telemetry CSV.
//!
//! Generates the trailing window ending now: the start timestamp is
//! `now - minutes`, floored to the whole minute.

use std::path::PathBuf;
use std::process;

use chrono::{TimeDelta, Utc};
use clap::Parser;

use edgemill::{write_raw_minute_csv, GeneratorConfig, TelemetryGenerator};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "edgemill-csv")]
#[command(about = "Generate synthetic CDN telemetry CSV (raw minute grain)", long_about = None)]
struct Args {
    /// Output CSV path (e.g. /tmp/telemetry.csv)
    #[arg(long)]
    out: PathBuf,

    /// Minutes to generate
    #[arg(long, default_value_t = 360)]
    minutes: u32,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Slice sampling density (0-1)
    #[arg(long, default_value_t = 0.10)]
    density: f64,

    /// Number of partner labels
    #[arg(long, default_value_t = 6)]
    partners: usize,

    /// Number of PoP labels
    #[arg(long, default_value_t = 20)]
    pops: usize,

    /// Number of host labels
    #[arg(long, default_value_t = 120)]
    hosts: usize,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let start = Utc::now() - TimeDelta::minutes(i64::from(args.minutes));
    let config = GeneratorConfig {
        start,
        minutes: args.minutes,
        partners: args.partners,
        pops: args.pops,
        hosts: args.hosts,
        seed: args.seed,
        density: args.density,
        ..GeneratorConfig::default()
    };

    let rows = TelemetryGenerator::new(config).generate();
    if let Err(err) = write_raw_minute_csv(&rows, &args.out, None) {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
    println!("Wrote {} rows -> {}", rows.len(), args.out.display());
}
