//! Per-month totals and the running balance
//!
//! Totals are a pure function of one [`BudgetState`]. Amounts are [`Money`],
//! so each step (column sums, profit/loss, every step of the balance fold)
//! lands on whole cents.

use std::collections::BTreeMap;

use crate::models::{BudgetState, CategoryType, Money, Period};

/// Aggregate rows of the budget grid, one value per visible month
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BudgetTotals {
    pub income_total: BTreeMap<Period, Money>,
    pub expense_total: BTreeMap<Period, Money>,
    pub profit_loss: BTreeMap<Period, Money>,
    pub opening_balance: Money,
    pub closing_balance: BTreeMap<Period, Money>,
}

impl BudgetTotals {
    /// Compute totals for every month of the state's range
    pub fn compute(state: &BudgetState) -> Self {
        let months = state.months();
        let income = state.income_categories();
        let expenses = state.expense_categories();

        let mut totals = Self {
            opening_balance: state.opening_balance(),
            ..Self::default()
        };

        for &period in &months {
            let income_total: Money = income
                .iter()
                .map(|c| state.cell_value(c.id, period))
                .sum();
            let expense_total: Money = expenses
                .iter()
                .map(|c| state.cell_value(c.id, period))
                .sum();

            totals.income_total.insert(period, income_total);
            totals.expense_total.insert(period, expense_total);
            totals
                .profit_loss
                .insert(period, income_total - expense_total);
        }

        let mut running = state.opening_balance();
        for period in &months {
            running += totals.profit_loss.get(period).copied().unwrap_or_default();
            totals.closing_balance.insert(*period, running);
        }

        totals
    }

    /// Total of one category type in a month; zero outside the range
    pub fn total_for(&self, kind: CategoryType, period: Period) -> Money {
        let column = match kind {
            CategoryType::Income => &self.income_total,
            CategoryType::Expense => &self.expense_total,
        };
        column.get(&period).copied().unwrap_or_default()
    }

    pub fn income(&self, period: Period) -> Money {
        self.total_for(CategoryType::Income, period)
    }

    pub fn expense(&self, period: Period) -> Money {
        self.total_for(CategoryType::Expense, period)
    }

    pub fn profit_loss(&self, period: Period) -> Money {
        self.profit_loss.get(&period).copied().unwrap_or_default()
    }

    /// Closing balance of a month; zero outside the range
    pub fn closing_balance(&self, period: Period) -> Money {
        self.closing_balance.get(&period).copied().unwrap_or_default()
    }

    /// Balance after the last month, or the opening balance for an empty range
    pub fn final_balance(&self) -> Money {
        self.closing_balance
            .values()
            .next_back()
            .copied()
            .unwrap_or(self.opening_balance)
    }

    /// Months covered, oldest first
    pub fn months(&self) -> impl Iterator<Item = Period> + '_ {
        self.profit_loss.keys().copied()
    }
}
