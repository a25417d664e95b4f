//! Binary target for streaming telemetry as line-delimited JSON to stdout.
//!
//! Takes a fixed start timestamp so replays are deterministic end to end:
//! the same arguments always print the same lines.

use std::io::{self, Write};
use std::process;

use clap::Parser;

use edgemill::time::parse_utc_timestamp;
use edgemill::{write_jsonl, GeneratorConfig, TelemetryGenerator};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "edgemill-jsonl")]
#[command(about = "Emit synthetic CDN telemetry as line-delimited JSON", long_about = None)]
struct Args {
    /// Minutes to generate
    #[arg(long, default_value_t = 60)]
    minutes: u32,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Fixed UTC start for deterministic replay (ISO-8601, e.g. 2026-02-20T00:00:00Z)
    #[arg(long, default_value = "2026-02-20T00:00:00Z")]
    start: String,

    /// Slice sampling density (0-1)
    #[arg(long, default_value_t = 0.10)]
    density: f64,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let start = match parse_utc_timestamp(&args.start) {
        Ok(ts) => ts,
        Err(err) => {
            eprintln!("ERROR: {err}");
            process::exit(1);
        }
    };

    let config = GeneratorConfig {
        start,
        minutes: args.minutes,
        seed: args.seed,
        density: args.density,
        ..GeneratorConfig::default()
    };

    let rows = TelemetryGenerator::new(config).generate();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write_jsonl(&rows, &mut out) {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
    if let Err(err) = out.flush() {
        eprintln!("ERROR: {err}");
        process::exit(1);
    }
}
