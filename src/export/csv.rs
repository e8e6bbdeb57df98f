//! CSV Export functionality
//!
//! Writes the budget grid as a spreadsheet-compatible table: one row per
//! category, then the aggregate rows, with one column per visible month.

use std::io::Write;

use crate::error::BudgetResult;
use crate::models::{BudgetState, Money};
use crate::reports::{GridReport, MonthSummary};

fn amount(value: Money) -> String {
    format!("{:.2}", value.as_f64())
}

/// Export the budget grid to CSV
pub fn export_grid_csv<W: Write>(state: &BudgetState, writer: W) -> BudgetResult<()> {
    let report = GridReport::generate(state);
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Section".to_string(), "Category".to_string()];
    header.extend(report.months.iter().map(|p| p.key()));
    header.push("Total".to_string());
    wtr.write_record(&header)?;

    for row in report.rows() {
        let mut record = vec![row.kind.to_string(), row.name.clone()];
        record.extend(row.values.iter().copied().map(amount));
        record.push(amount(row.total()));
        wtr.write_record(&record)?;
    }

    let summary_rows: [(&str, fn(&MonthSummary) -> Money); 4] = [
        ("Total Income", |s| s.income),
        ("Total Expenses", |s| s.expense),
        ("Profit / Loss", |s| s.profit_loss),
        ("Closing Balance", |s| s.closing_balance),
    ];

    for (label, value) in summary_rows {
        let mut record = vec!["summary".to_string(), label.to_string()];
        record.extend(report.summaries.iter().map(|s| amount(value(s))));
        let total = if label == "Closing Balance" {
            report.final_balance()
        } else {
            report.summaries.iter().map(value).sum()
        };
        record.push(amount(total));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
