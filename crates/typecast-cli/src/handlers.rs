//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod cast;
mod check;

pub use cast::handle_cast;
pub use check::handle_check;
