//! Error handling module for zasm-expand
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Every failure of the expansion pipeline is surfaced through [`ExpandError`];
//! nothing is retried and nothing is silently skipped.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the expansion pipeline
#[derive(Error, Debug)]
pub enum ExpandError {
    /// The template path does not exist or is not readable
    #[error("Cannot read template {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A substitution site has no usable `%N=...` annotation on the line above it.
    /// `line` is 1-based, as an editor would show it.
    #[error("No annotation for {placeholder} above line {line}")]
    UnresolvedAnnotation { placeholder: String, line: usize },

    /// An output file could not be created or written
    #[error("Failed to write {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Expanding one more placeholder would exceed the configured variant cap
    #[error("Expansion would produce {requested} variants, limit is {limit}")]
    VariantLimitExceeded { limit: usize, requested: usize },
}

/// Result type alias for expansion operations
pub type Result<T> = std::result::Result<T, ExpandError>;

// Convenient error constructors
impl ExpandError {
    /// Create an input error for `path`
    pub fn input_not_found(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::InputNotFound {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an unresolved-annotation error; `index` is the 0-based line index
    pub fn unresolved(placeholder: impl Into<String>, index: usize) -> Self {
        Self::UnresolvedAnnotation {
            placeholder: placeholder.into(),
            line: index + 1,
        }
    }

    /// Create an output error for `path`
    pub fn output_write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
