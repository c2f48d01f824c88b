//! Benchmark totals helper
//!
//! Prints per-machine timing totals from saved benchmark output, plus how
//! much slower `lambda` was than the other machines.
//!
//! Usage:
//!   zasm-bench-totals <path-to-bench-output>

use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zasm_expand::bench_report;

/// Sum benchmark estimates per machine
#[derive(Parser, Debug)]
#[command(name = "zasm-bench-totals")]
#[command(version)]
struct Args {
    /// Benchmark output to summarize
    report: PathBuf,
}

fn main() {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match bench_report::parse_report_file(&args.report) {
        Ok(totals) => {
            debug!("Parsed totals: {:?}", totals);
            print!("{}", totals.render());
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }
}
