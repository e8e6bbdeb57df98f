//! Export module for budget-builder
//!
//! Provides budget export in multiple formats:
//! - CSV: the grid as a spreadsheet-compatible table
//! - JSON: machine-readable full export
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_grid_csv;
pub use json::{export_full_json, BudgetExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
