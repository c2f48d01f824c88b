//! Template loading.
//!
//! A template is the input file split into lines. Each line keeps its own
//! terminator (`\n` or `\r\n`), so concatenating the lines of any file state
//! reproduces the file byte for byte.

use crate::error::{ExpandError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// The loaded input file, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    lines: Vec<String>,
}

impl Template {
    /// Read a template from disk.
    ///
    /// Missing, unreadable and non-UTF-8 files all map to
    /// [`ExpandError::InputNotFound`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ExpandError::input_not_found(path, e))?;
        let template = Self::from_text(&content);
        debug!(
            "Loaded template {} ({} lines)",
            path.display(),
            template.len()
        );
        Ok(template)
    }

    /// Build a template from in-memory text
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
