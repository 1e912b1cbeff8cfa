//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Message catalog tooling.
#[derive(Debug, Parser)]
#[command(name = "iris-catalog")]
#[command(version)]
#[command(about = "Coverage checks and format conversion for Iris Wallet message catalogs")]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalogs, overriding the configuration
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    pub translations_dir: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Tool subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load every catalog and report coverage against a reference
    Check {
        /// Reference locale (default: the configured default locale)
        #[arg(short, long, value_name = "LOCALE")]
        reference: Option<String>,

        /// Fail on missing keys, extra keys or placeholder mismatches
        #[arg(short, long)]
        strict: bool,
    },

    /// Print one message, formatted with positional arguments
    Get {
        /// Locale to read
        #[arg(value_name = "LOCALE")]
        locale: String,

        /// Message key
        #[arg(value_name = "KEY")]
        key: String,

        /// Values for {0}, {1}, ...
        #[arg(value_name = "ARGS")]
        args: Vec<String>,

        /// Context to look in (default: the configured context)
        #[arg(long)]
        context: Option<String>,
    },

    /// Print every key of a locale as context/key
    Keys {
        /// Locale to read
        #[arg(value_name = "LOCALE")]
        locale: String,
    },

    /// Convert a catalog between TS and JSON, by file extension
    Convert {
        /// Catalog to read
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Catalog to write
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Locale of the catalog (default: the input file name)
        #[arg(short, long)]
        locale: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_global_options() {
        let cli = Cli::try_parse_from([
            "iris-catalog",
            "check",
            "--strict",
            "--reference",
            "en_IN",
            "-d",
            "translations",
        ])
        .unwrap();
        assert_eq!(cli.translations_dir, Some(PathBuf::from("translations")));
        assert!(matches!(
            cli.command,
            Command::Check { strict: true, reference: Some(ref r) } if r == "en_IN"
        ));
    }

    #[test]
    fn test_parse_get_collects_arguments() {
        let cli = Cli::try_parse_from([
            "iris-catalog",
            "get",
            "en_IN",
            "channel_capacity_validation",
            "20000",
            "16777215",
        ])
        .unwrap();
        let Command::Get { locale, key, args, context } = cli.command else {
            panic!("expected get");
        };
        assert_eq!(locale, "en_IN");
        assert_eq!(key, "channel_capacity_validation");
        assert_eq!(args, ["20000", "16777215"]);
        assert!(context.is_none());
    }

    #[test]
    fn test_convert_requires_both_paths() {
        assert!(Cli::try_parse_from(["iris-catalog", "convert", "en_IN.ts"]).is_err());
    }
}
