use clap::Parser;
use std::path::PathBuf;

use crate::config::ExpandConfig;
use crate::placeholder::PlaceholderOrder;

/// zasm-expand - Expand annotated .zasm templates into every operand variant
#[derive(Parser, Debug)]
#[command(name = "zasm-expand")]
#[command(about = "Writes one .zasm file per combination of annotated placeholder values")]
#[command(version)]
pub struct Cli {
    /// Template file to expand (e.g. programs/add_test.zasm)
    pub template: PathBuf,

    /// Placeholder processing order, which fixes output numbering
    /// (first-seen, numeric)
    #[arg(long)]
    pub order: Option<PlaceholderOrder>,

    /// Fail instead of producing more than this many variants
    #[arg(long)]
    pub max_variants: Option<usize>,

    /// Print the files that would be written without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// JSON file with expansion settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Layer the command-line flags over a base configuration
    pub fn apply_to(&self, mut config: ExpandConfig) -> ExpandConfig {
        if let Some(order) = self.order {
            config.order = order;
        }
        if self.max_variants.is_some() {
            config.max_variants = self.max_variants;
        }
        config.dry_run |= self.dry_run;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_template_only() {
        let cli = Cli::try_parse_from(["zasm-expand", "programs/add_test.zasm"]).unwrap();
        assert_eq!(cli.template, PathBuf::from("programs/add_test.zasm"));
        assert!(cli.order.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_requires_template() {
        assert!(Cli::try_parse_from(["zasm-expand"]).is_err());
    }

    #[test]
    fn test_cli_rejects_extra_positional() {
        assert!(Cli::try_parse_from(["zasm-expand", "a.zasm", "b.zasm"]).is_err());
    }

    #[test]
    fn test_cli_options() {
        let cli = Cli::try_parse_from([
            "zasm-expand",
            "--order",
            "numeric",
            "--max-variants",
            "128",
            "--dry-run",
            "add.zasm",
        ])
        .unwrap();
        assert_eq!(cli.order, Some(PlaceholderOrder::Numeric));
        assert_eq!(cli.max_variants, Some(128));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_rejects_unknown_order() {
        assert!(Cli::try_parse_from(["zasm-expand", "--order", "random", "add.zasm"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli =
            Cli::try_parse_from(["zasm-expand", "--order", "first-seen", "add.zasm"]).unwrap();
        let base = ExpandConfig {
            order: PlaceholderOrder::Numeric,
            max_variants: Some(10),
            dry_run: false,
        };
        let merged = cli.apply_to(base);
        assert_eq!(merged.order, PlaceholderOrder::FirstSeen);
        assert_eq!(merged.max_variants, Some(10));
        assert!(!merged.dry_run);
    }
}
