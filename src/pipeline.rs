//! The end-to-end run: load, scan, expand, write.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExpandConfig;
use crate::error::Result;
use crate::expander::{Choice, Expander};
use crate::placeholder::scan;
use crate::template::Template;
use crate::writer;

/// One produced (or, in a dry run, planned) output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub path: PathBuf,
    pub choices: Vec<Choice>,
}

/// Result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outputs: Vec<Output>,
    /// False for dry runs
    pub written: bool,
}

/// Expand the template at `input` and write every variant next to it.
///
/// Expansion finishes completely before the first file is written, so input
/// and annotation errors never leave outputs behind.
pub fn run(input: &Path, config: &ExpandConfig) -> Result<Report> {
    let template = Template::load(input)?;
    let placeholders = scan(&template, config.order);
    info!(
        "Found {} placeholder(s) in {}: {:?}",
        placeholders.len(),
        input.display(),
        placeholders.iter().map(|p| p.as_str()).collect::<Vec<_>>()
    );

    let set = Expander::new(config.max_variants).expand(&template, &placeholders)?;

    let paths = if config.dry_run {
        writer::plan(&set, input)
    } else {
        writer::write_variants(&set, input)?
    };

    let outputs = set
        .into_iter()
        .zip(paths)
        .map(|(state, path)| Output {
            path,
            choices: state.choices().to_vec(),
        })
        .collect();

    Ok(Report {
        outputs,
        written: !config.dry_run,
    })
}
