//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the budget store.

pub mod run;
pub mod script;

pub use run::{handle_run_command, OutputFormat, RunArgs};
pub use script::{parse_script, run_script, ScriptCommand, ScriptSummary};
