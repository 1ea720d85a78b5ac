//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Typecast CLI - cast JSON leaves of JSON-lines records to declared types
///
/// Reads one JSON object per line, casts the declared columns and JSON paths,
/// and writes the records back out with their shape unchanged.
#[derive(Parser, Debug)]
#[command(
    name = "typecast",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file (YAML, TOML or JSON)
    #[arg(short, long, global = true, env = "TYPECAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cast records read as JSON lines
    Cast(CastArgs),

    /// Validate a configuration and show the compiled paths
    Check(CheckArgs),
}

/// Arguments for the cast command
#[derive(Parser, Debug)]
pub struct CastArgs {
    /// JSON-lines input file (stdin if not specified)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Pretty-print each output record
    #[arg(long)]
    pub pretty: bool,

    /// Abort on the first record that fails to cast
    #[arg(long)]
    pub stop_on_invalid_record: bool,

    /// Reject malformed JSON paths in the configuration
    #[arg(long)]
    pub strict_paths: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Also list every prefix used to prune traversal
    #[arg(long)]
    pub prefixes: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var("NO_COLOR").is_err() && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_args() {
        let cli = Cli::parse_from([
            "typecast",
            "-c",
            "typecast.yml",
            "cast",
            "records.jsonl",
            "--save-to",
            "out.jsonl",
            "--stop-on-invalid-record",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("typecast.yml")));
        match cli.command {
            Commands::Cast(args) => {
                assert_eq!(args.input, Some(PathBuf::from("records.jsonl")));
                assert_eq!(args.output_file, Some(PathBuf::from("out.jsonl")));
                assert!(args.stop_on_invalid_record);
                assert!(!args.strict_paths);
                assert!(!args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_args_and_verbosity() {
        let cli = Cli::parse_from(["typecast", "-vv", "check", "--prefixes"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(cli.command, Commands::Check(CheckArgs { prefixes: true })));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["typecast", "-q", "-v", "check"]).is_err());
        let cli = Cli::parse_from(["typecast", "--quiet", "cast"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
