//! zasm-expand - Main entry point
//!
//! Expands one template and prints the path of every output file.

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use zasm_expand::cli::Cli;
use zasm_expand::{pipeline, ExpandConfig, Output};

/// Initialize the logger with appropriate settings
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    // RUST_LOG overrides the default level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn describe(output: &Output) -> String {
    if output.choices.is_empty() {
        return output.path.display().to_string();
    }
    let picks: Vec<String> = output
        .choices
        .iter()
        .map(|c| format!("{}={}", c.placeholder, c.value))
        .collect();
    format!("{} ({})", output.path.display(), picks.join(" "))
}

fn run(cli: &Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => {
            info!("Loading configuration file: {:?}", path);
            ExpandConfig::load_from_file(path)?
        }
        None => ExpandConfig::default(),
    };
    let config = cli.apply_to(base);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);

    let report = pipeline::run(&cli.template, &config)
        .with_context(|| format!("Failed to expand {}", cli.template.display()))?;

    for output in &report.outputs {
        println!("{}", describe(output));
    }
    if report.written {
        info!("Wrote {} file(s)", report.outputs.len());
    } else {
        info!("Dry run: {} file(s) not written", report.outputs.len());
    }
    Ok(())
}

/// Main application entry point
fn main() {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
