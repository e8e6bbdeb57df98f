//! `budget run` command
//!
//! Builds a fresh store, runs a script against it and prints the resulting
//! grid in the requested format.

use std::io::{self, Read, Write};

use clap::{Args, ValueEnum};
use tracing::{debug, info};

use super::script::run_script;
use crate::config::Settings;
use crate::display::format_budget_grid;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_full_json, export_full_yaml, export_grid_csv};
use crate::reports::GridReport;
use crate::store::BudgetStore;

/// Output format for the resulting budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Terminal table
    #[default]
    Table,
    /// Grid as CSV
    Csv,
    /// Full export as JSON
    Json,
    /// Full export as YAML
    Yaml,
}

/// Arguments of `budget run`
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Script file to execute, or `-` for stdin
    pub script: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Start without the default categories
    #[arg(long)]
    pub no_defaults: bool,
}

fn read_script(script: &str) -> BudgetResult<String> {
    if script == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| BudgetError::Io(format!("Failed to read script from stdin: {}", e)))?;
        Ok(source)
    } else {
        std::fs::read_to_string(script)
            .map_err(|e| BudgetError::Io(format!("Failed to read script {}: {}", script, e)))
    }
}

/// Write the store's current state in `format`
pub fn render<W: Write>(store: &BudgetStore, format: OutputFormat, writer: &mut W) -> BudgetResult<()> {
    match format {
        OutputFormat::Table => {
            let table = format_budget_grid(&GridReport::generate(store.state()));
            writeln!(writer, "{}", table)?;
        }
        OutputFormat::Csv => export_grid_csv(store.state(), &mut *writer)?,
        OutputFormat::Json => export_full_json(store.state(), writer, true)?,
        OutputFormat::Yaml => export_full_yaml(store.state(), writer)?,
    }
    Ok(())
}

/// Handle `budget run`
pub fn handle_run_command(settings: &Settings, args: RunArgs) -> BudgetResult<()> {
    let mut settings = settings.clone();
    if args.no_defaults {
        settings.seed_default_categories = false;
    }
    let mut store = settings.build_store();
    debug!(
        categories = store.categories().len(),
        months = store.months().len(),
        "budget store ready"
    );

    let source = read_script(&args.script)?;
    let summary = run_script(&mut store, &source)?;
    info!(commands = summary.commands, version = summary.version, "script finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&store, args.format, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;

    #[test]
    fn test_render_formats() {
        let mut store = BudgetStore::new();
        store.set_end_period(Period::new(0, 2024));

        let mut table = Vec::new();
        render(&store, OutputFormat::Table, &mut table).unwrap();
        assert!(String::from_utf8(table).unwrap().contains("January 2024"));

        let mut csv = Vec::new();
        render(&store, OutputFormat::Csv, &mut csv).unwrap();
        assert!(String::from_utf8(csv).unwrap().starts_with("Section,Category,2024-00,Total"));

        let mut json = Vec::new();
        render(&store, OutputFormat::Json, &mut json).unwrap();
        assert!(String::from_utf8(json).unwrap().contains("\"schema_version\""));
    }
}
