//! JSON Export functionality
//!
//! Exports a budget (categories, cells, range and computed totals) to JSON
//! with schema versioning. Exports are write-only snapshots.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetState, Category, CategoryId, Period};
use crate::reports::GridReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full budget export structure
#[derive(Debug, Clone, Serialize)]
pub struct BudgetExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub start_period: Period,
    pub end_period: Period,
    pub opening_balance: f64,

    /// All categories, in insertion order
    pub categories: Vec<Category>,

    /// Every stored cell, orphaned ones included
    pub cells: Vec<CellExport>,

    /// Computed per-month totals
    pub totals: Vec<MonthTotalsExport>,
}

/// A stored cell with a plain decimal value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellExport {
    pub category_id: CategoryId,
    pub period: Period,
    pub value: f64,
}

/// Aggregates of one visible month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotalsExport {
    /// Canonical month key, e.g. `2024-00`
    pub month: String,
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub profit_loss: f64,
    pub closing_balance: f64,
}

impl BudgetExport {
    /// Snapshot a budget state for export
    pub fn from_state(state: &BudgetState) -> Self {
        let report = GridReport::generate(state);

        let cells = state
            .cells()
            .values()
            .map(|cell| CellExport {
                category_id: cell.category_id,
                period: cell.period,
                value: cell.value.as_f64(),
            })
            .collect();

        let totals = report
            .summaries
            .iter()
            .map(|s| MonthTotalsExport {
                month: s.period.key(),
                label: s.period.to_string(),
                income: s.income.as_f64(),
                expense: s.expense.as_f64(),
                profit_loss: s.profit_loss.as_f64(),
                closing_balance: s.closing_balance.as_f64(),
            })
            .collect();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            start_period: state.start_period(),
            end_period: state.end_period(),
            opening_balance: state.opening_balance().as_f64(),
            categories: state.categories().to_vec(),
            cells,
            totals,
        }
    }
}

/// Export a budget to JSON
pub fn export_full_json<W: Write>(
    state: &BudgetState,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = BudgetExport::from_state(state);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
