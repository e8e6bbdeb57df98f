//! Budget grid report
//!
//! A [`GridReport`] is a flattened, render-ready copy of one budget state:
//! category rows in grid order with one value per visible month, followed by
//! the aggregate rows. Terminal tables and exports are all built from it.

use serde::Serialize;

use crate::models::{format_month_year, BudgetState, CategoryId, CategoryType, Money, Period};
use crate::store::BudgetTotals;

/// One category row of the grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub is_parent: bool,
    /// One value per month of [`GridReport::months`]
    pub values: Vec<Money>,
}

impl GridRow {
    /// Sum of the row across every visible month
    pub fn total(&self) -> Money {
        self.values.iter().copied().sum()
    }
}

/// Aggregates of one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub period: Period,
    pub income: Money,
    pub expense: Money,
    pub profit_loss: Money,
    pub closing_balance: Money,
}

/// Render-ready view of a budget
#[derive(Debug, Clone, PartialEq)]
pub struct GridReport {
    pub months: Vec<Period>,
    pub income: Vec<GridRow>,
    pub expenses: Vec<GridRow>,
    pub summaries: Vec<MonthSummary>,
    pub opening_balance: Money,
}

impl GridReport {
    /// Build the report for the state's visible range
    pub fn generate(state: &BudgetState) -> Self {
        let months = state.months();
        let totals = BudgetTotals::compute(state);

        let rows = |kind: CategoryType| -> Vec<GridRow> {
            state
                .categories_of(kind)
                .into_iter()
                .map(|category| GridRow {
                    category_id: category.id,
                    name: category.name.clone(),
                    kind,
                    is_parent: category.is_parent,
                    values: months
                        .iter()
                        .map(|&period| state.cell_value(category.id, period))
                        .collect(),
                })
                .collect()
        };

        let summaries = months
            .iter()
            .map(|&period| MonthSummary {
                period,
                income: totals.income(period),
                expense: totals.expense(period),
                profit_loss: totals.profit_loss(period),
                closing_balance: totals.closing_balance(period),
            })
            .collect();

        Self {
            income: rows(CategoryType::Income),
            expenses: rows(CategoryType::Expense),
            summaries,
            opening_balance: totals.opening_balance,
            months,
        }
    }

    /// Column headings for the visible months, e.g. `"January 2024"`
    pub fn month_labels(&self) -> Vec<String> {
        self.months.iter().map(format_month_year).collect()
    }

    /// Category rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.income.iter().chain(self.expenses.iter())
    }

    /// Balance after the last visible month
    pub fn final_balance(&self) -> Money {
        self.summaries
            .last()
            .map(|s| s.closing_balance)
            .unwrap_or(self.opening_balance)
    }
}
