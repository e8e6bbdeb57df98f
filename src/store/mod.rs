//! Budget state store
//!
//! [`BudgetStore`] exclusively owns the canonical [`BudgetState`] and is the
//! only way to change it. Every mutation runs to completion against a
//! copy-on-write handle, so a [`snapshot`](BudgetStore::snapshot) taken before
//! the call never observes it. Reads derive months, sorted rows and totals
//! from the current state each time they are called.
//!
//! No operation here returns an error. Unknown categories are tolerated (cells
//! written against them become orphaned data that totals never include), and
//! period inversions are resolved by fixed rules.

pub mod intents;
pub mod totals;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{
    BudgetState, Category, CategoryId, CategoryType, Cell, CellKey, CellPosition, Money,
    ParentCategoryId, Period,
};

pub use intents::{Direction, GridIntent};
pub use totals::BudgetTotals;

/// Owner of the canonical budget state
#[derive(Debug, Clone)]
pub struct BudgetStore {
    state: Arc<BudgetState>,
    version: u64,
}

impl BudgetStore {
    /// Store seeded with the default categories over January to December 2024
    pub fn new() -> Self {
        Self::from_state(BudgetState::default())
    }

    /// Store with no categories over the default range
    pub fn empty() -> Self {
        Self::from_state(BudgetState::empty())
    }

    pub fn from_state(state: BudgetState) -> Self {
        Self {
            state: Arc::new(state),
            version: 0,
        }
    }

    /// Immutable handle to the current state
    ///
    /// The handle keeps showing this exact state after later mutations.
    pub fn snapshot(&self) -> Arc<BudgetState> {
        Arc::clone(&self.state)
    }

    /// Borrow the current state
    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    /// Counter bumped each time a mutation replaces the state
    pub fn version(&self) -> u64 {
        self.version
    }

    fn update<R>(&mut self, mutate: impl FnOnce(&mut BudgetState) -> R) -> R {
        let result = mutate(Arc::make_mut(&mut self.state));
        self.version += 1;
        result
    }

    // === Derived reads ===

    pub fn categories(&self) -> &[Category] {
        self.state.categories()
    }

    /// Income categories sorted by order
    pub fn income_categories(&self) -> Vec<&Category> {
        self.state.income_categories()
    }

    /// Expense categories sorted by order
    pub fn expense_categories(&self) -> Vec<&Category> {
        self.state.expense_categories()
    }

    /// Visible months, start to end inclusive
    pub fn months(&self) -> Vec<Period> {
        self.state.months()
    }

    /// Per-month totals and running balance, recomputed on every call
    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals::compute(&self.state)
    }

    pub fn cells(&self) -> &BTreeMap<CellKey, Cell> {
        self.state.cells()
    }

    pub fn start_period(&self) -> Period {
        self.state.start_period()
    }

    pub fn end_period(&self) -> Period {
        self.state.end_period()
    }

    pub fn focused_cell(&self) -> Option<CellPosition> {
        self.state.focused_cell()
    }

    pub fn opening_balance(&self) -> Money {
        self.state.opening_balance()
    }

    // === Cells ===

    /// Value of a cell; zero when nothing was written there
    pub fn get_cell_value(&self, category_id: CategoryId, period: Period) -> Money {
        self.state.cell_value(category_id, period)
    }

    /// Write a cell, rounding the value to two decimals
    ///
    /// The category is not required to exist.
    pub fn set_cell_value(&mut self, category_id: CategoryId, period: Period, value: impl Into<Money>) {
        let value = value.into();
        debug!(%category_id, period = %period.key(), %value, "set cell value");

        self.update(|state| {
            state
                .cells
                .insert(CellKey::new(category_id, period), Cell::new(category_id, period, value));
        });
    }

    /// Copy the value at `source` into every visible month of the category,
    /// the source month included
    pub fn apply_to_all_months(&mut self, category_id: CategoryId, source: Period) {
        let value = self.get_cell_value(category_id, source);
        let months = self.months();
        debug!(%category_id, source = %source.key(), %value, months = months.len(), "apply to all months");

        self.update(|state| {
            for period in months {
                state
                    .cells
                    .insert(CellKey::new(category_id, period), Cell::new(category_id, period, value));
            }
        });
    }

    // === Categories ===

    /// Append a category at the end of its `(kind, parent_id)` group
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        kind: CategoryType,
        parent_id: ParentCategoryId,
        is_parent: bool,
    ) -> CategoryId {
        let order = self
            .state
            .categories
            .iter()
            .filter(|c| c.same_group(kind, parent_id))
            .map(|c| c.order)
            .max()
            .unwrap_or(-1)
            + 1;

        let mut category = Category::new(name, kind, parent_id, order);
        category.is_parent = is_parent;
        let id = category.id;
        debug!(%id, name = %category.name, %kind, order, "add category");

        self.update(|state| state.categories.push(category));
        id
    }

    /// Insert a new category directly below `after`, shifting later rows of
    /// the same group down by one
    ///
    /// Returns `None` and leaves the state untouched when `after` is unknown.
    pub fn add_subcategory(&mut self, after: CategoryId) -> Option<CategoryId> {
        let Some(target) = self.state.category(after) else {
            warn!(%after, "add subcategory: unknown category");
            return None;
        };

        let (kind, parent_id) = (target.kind, target.parent_id);
        let new_order = target.order + 1;
        let category = Category::new(kind.default_category_name(), kind, parent_id, new_order);
        let id = category.id;
        debug!(%id, %after, order = new_order, "add subcategory");

        self.update(|state| {
            for existing in state
                .categories
                .iter_mut()
                .filter(|c| c.same_group(kind, parent_id) && c.order >= new_order)
            {
                existing.order += 1;
            }
            state.categories.push(category);
        });
        Some(id)
    }

    /// Remove a category together with all of its cells
    ///
    /// Clears the focused cell if it was on this category. Returns the removed
    /// category, if there was one; cells are purged either way.
    pub fn delete_category(&mut self, category_id: CategoryId) -> Option<Category> {
        debug!(%category_id, "delete category");

        self.update(|state| {
            let removed = state
                .categories
                .iter()
                .position(|c| c.id == category_id)
                .map(|index| state.categories.remove(index));

            state.cells.retain(|key, _| key.category_id != category_id);

            if state
                .focused_cell
                .is_some_and(|focus| focus.category_id == category_id)
            {
                state.focused_cell = None;
            }

            removed
        })
    }

    // === Periods ===

    /// Move the first visible month
    ///
    /// A start after the current end drags the end along, leaving a
    /// single-month range.
    pub fn set_start_period(&mut self, period: Period) {
        debug!(period = %period.key(), "set start period");

        self.update(|state| {
            if period > state.end_period {
                state.end_period = period;
            }
            state.start_period = period;
        });
    }

    /// Move the last visible month
    ///
    /// An end before the current start is ignored. Returns whether the end
    /// changed.
    pub fn set_end_period(&mut self, period: Period) -> bool {
        if period < self.state.start_period {
            warn!(
                period = %period.key(),
                start = %self.state.start_period.key(),
                "end period before start period ignored"
            );
            return false;
        }

        debug!(period = %period.key(), "set end period");
        self.update(|state| state.end_period = period);
        true
    }

    // === Focus & opening balance ===

    pub fn set_focused_cell(&mut self, position: Option<CellPosition>) {
        self.update(|state| state.focused_cell = position);
    }

    /// Set the balance carried into the first month, rounded to two decimals
    pub fn set_opening_balance(&mut self, value: impl Into<Money>) {
        let value = value.into();
        debug!(%value, "set opening balance");
        self.update(|state| state.opening_balance = value);
    }
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self::new()
    }
}
