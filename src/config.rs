//! Expansion settings, loadable from a JSON file.
//!
//! Precedence, lowest first: defaults, the `--config` file, command-line flags.
//! Every field is optional in the file:
//!
//! ```json
//! { "order": "numeric", "max_variants": 4096, "dry_run": false }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::placeholder::PlaceholderOrder;

/// Settings for one expansion run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandConfig {
    /// Placeholder processing order (fixes output numbering)
    pub order: PlaceholderOrder,
    /// Refuse to produce more than this many variants
    pub max_variants: Option<usize>,
    /// Report the planned outputs without writing them
    pub dry_run: bool,
}

impl ExpandConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_variants == Some(0) {
            anyhow::bail!("max_variants must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExpandConfig::default();
        assert_eq!(config.order, PlaceholderOrder::FirstSeen);
        assert_eq!(config.max_variants, None);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExpandConfig = serde_json::from_str(r#"{ "order": "numeric" }"#).unwrap();
        assert_eq!(config.order, PlaceholderOrder::Numeric);
        assert_eq!(config.max_variants, None);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = ExpandConfig {
            max_variants: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expand.json");
        let config = ExpandConfig {
            order: PlaceholderOrder::Numeric,
            max_variants: Some(64),
            dry_run: true,
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(ExpandConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ order: ").unwrap();
        let err = ExpandConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration JSON"));
    }
}
