//! zasm-expand library
//!
//! Expands a `.zasm` template whose operands are written as numbered
//! placeholders (`%1`, `%2`, ...) into every combination of the values
//! declared for them in the comment line above each use.

pub mod annotation;
pub mod bench_report;
pub mod cli;
pub mod config;
pub mod error;
pub mod expander;
pub mod pipeline;
pub mod placeholder;
pub mod template;
pub mod writer;

// Re-export main types for convenience
pub use config::ExpandConfig;
pub use error::{ExpandError, Result};
pub use expander::{Choice, Expander, FileState, VariantSet};
pub use pipeline::{run, Output, Report};
pub use placeholder::{scan, Placeholder, PlaceholderOrder};
pub use template::Template;
