//! Typecast CLI - cast JSON leaves of JSON-lines records to declared types
//!
//! This is the main entry point for the `typecast` binary.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let config = {
        let _config_timer = Timer::new("config_loading");
        config::load_with_file(cli.config.as_deref())?
    };

    match cli.command {
        Commands::Cast(args) => handlers::handle_cast(args, config),
        Commands::Check(args) => handlers::handle_check(args, &config),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();
    logging_config.ansi = cli.use_color();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}
