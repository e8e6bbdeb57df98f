//! Budget grid table formatting
//!
//! Renders a [`GridReport`] as a terminal table: one column per visible month,
//! income rows, expense rows and the aggregate rows below them.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::{format_currency, Money};
use crate::reports::{GridReport, GridRow, MonthSummary};

fn amount(value: Money) -> String {
    format_currency(value.as_f64())
}

fn category_record(row: &GridRow) -> Vec<String> {
    let label = if row.is_parent {
        row.name.to_uppercase()
    } else {
        format!("  {}", row.name)
    };

    std::iter::once(label)
        .chain(row.values.iter().copied().map(amount))
        .chain(std::iter::once(amount(row.total())))
        .collect()
}

fn summary_record(
    label: &str,
    summaries: &[MonthSummary],
    value: impl Fn(&MonthSummary) -> Money,
    total: Option<Money>,
) -> Vec<String> {
    let total = total.unwrap_or_else(|| summaries.iter().map(&value).sum());
    std::iter::once(label.to_string())
        .chain(summaries.iter().map(|s| amount(value(s))))
        .chain(std::iter::once(amount(total)))
        .collect()
}

fn section_record(label: &str, columns: usize) -> Vec<String> {
    std::iter::once(label.to_string())
        .chain(std::iter::repeat(String::new()).take(columns - 1))
        .collect()
}

/// Format the budget grid as a table
pub fn format_budget_grid(report: &GridReport) -> String {
    if report.months.is_empty() {
        return "No months in range.".to_string();
    }

    let columns = report.months.len() + 2;

    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once("Category".to_string())
            .chain(report.month_labels())
            .chain(std::iter::once("Total".to_string())),
    );

    builder.push_record(section_record("INCOME", columns));
    for row in &report.income {
        builder.push_record(category_record(row));
    }
    builder.push_record(summary_record(
        "Total Income",
        &report.summaries,
        |s| s.income,
        None,
    ));

    builder.push_record(section_record("EXPENSES", columns));
    for row in &report.expenses {
        builder.push_record(category_record(row));
    }
    builder.push_record(summary_record(
        "Total Expenses",
        &report.summaries,
        |s| s.expense,
        None,
    ));

    builder.push_record(summary_record(
        "Profit / Loss",
        &report.summaries,
        |s| s.profit_loss,
        None,
    ));

    // Each month opens on the previous month's closing balance.
    let mut opening = report.opening_balance;
    let openings: Vec<String> = std::iter::once("Opening Balance".to_string())
        .chain(report.summaries.iter().map(|s| {
            let cell = amount(opening);
            opening = s.closing_balance;
            cell
        }))
        .chain(std::iter::once(amount(report.opening_balance)))
        .collect();
    builder.push_record(openings);

    builder.push_record(summary_record(
        "Closing Balance",
        &report.summaries,
        |s| s.closing_balance,
        Some(report.final_balance()),
    ));

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetState, Period};
    use crate::store::BudgetStore;

    #[test]
    fn test_format_budget_grid() {
        let mut store = BudgetStore::new();
        store.set_end_period(Period::new(1, 2024));
        let sales = store.state().find_category_by_name("Sales").unwrap().id;
        store.set_opening_balance(1000.0);
        store.set_cell_value(sales, Period::new(0, 2024), 1234.5);

        let output = format_budget_grid(&GridReport::generate(store.state()));

        assert!(output.contains("January 2024"));
        assert!(output.contains("February 2024"));
        assert!(!output.contains("March 2024"));
        assert!(output.contains("Sales"));
        assert!(output.contains("1,234.50"));
        assert!(output.contains("2,234.50"));
        assert!(output.contains("Closing Balance"));
    }

    #[test]
    fn test_empty_categories_still_show_totals() {
        let output = format_budget_grid(&GridReport::generate(&BudgetState::empty()));
        assert!(output.contains("Total Income"));
        assert!(output.contains("0.00"));
    }
}
