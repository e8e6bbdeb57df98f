//! Canonical budget state
//!
//! [`BudgetState`] is the single source of truth the store owns. Everything a
//! grid shows (visible months, sorted rows, totals) is derived from it on
//! demand; nothing derived is stored here.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use super::category::{default_categories, Category, CategoryType, ParentCategoryId};
use super::cell::{Cell, CellKey, CellPosition};
use super::ids::CategoryId;
use super::money::Money;
use super::period::{months_between, Period};

/// First month of the range a new budget shows
pub const DEFAULT_START_PERIOD: Period = Period::january(2024);

/// Last month of the range a new budget shows
pub const DEFAULT_END_PERIOD: Period = Period::december(2024);

/// Canonical state of a budget
///
/// Fields are only writable inside the crate; outside code changes state
/// through [`crate::store::BudgetStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetState {
    pub(crate) categories: Vec<Category>,
    pub(crate) cells: BTreeMap<CellKey, Cell>,
    pub(crate) start_period: Period,
    pub(crate) end_period: Period,
    pub(crate) focused_cell: Option<CellPosition>,
    pub(crate) opening_balance: Money,
}

impl BudgetState {
    /// Build a state with the given categories and range
    ///
    /// An inverted range collapses to the start month, the same way
    /// [`crate::store::BudgetStore::set_start_period`] resolves it. Categories
    /// are normalized: a repeated ID keeps only its first occurrence, and
    /// clashing orders within a `(type, parent)` group are pushed down until
    /// every order in the group is unique.
    pub fn new(
        categories: Vec<Category>,
        start_period: Period,
        end_period: Period,
        opening_balance: Money,
    ) -> Self {
        Self {
            categories: normalize_categories(categories),
            cells: BTreeMap::new(),
            start_period,
            end_period: end_period.max(start_period),
            focused_cell: None,
            opening_balance,
        }
    }

    /// State with no categories over the default range
    pub fn empty() -> Self {
        Self::new(
            Vec::new(),
            DEFAULT_START_PERIOD,
            DEFAULT_END_PERIOD,
            Money::zero(),
        )
    }

    /// Every category, in insertion order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by ID
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category by name (case-insensitive)
    pub fn find_category_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Categories of one type, sorted by ascending order
    ///
    /// The sort is stable, so equal orders keep insertion order.
    pub fn categories_of(&self, kind: CategoryType) -> Vec<&Category> {
        let mut categories: Vec<&Category> =
            self.categories.iter().filter(|c| c.kind == kind).collect();
        categories.sort_by_key(|c| c.order);
        categories
    }

    /// Income categories in display order
    pub fn income_categories(&self) -> Vec<&Category> {
        self.categories_of(CategoryType::Income)
    }

    /// Expense categories in display order
    pub fn expense_categories(&self) -> Vec<&Category> {
        self.categories_of(CategoryType::Expense)
    }

    /// Grid rows top to bottom: income rows, then expense rows
    pub fn grid_rows(&self) -> Vec<&Category> {
        let mut rows = self.income_categories();
        rows.extend(self.expense_categories());
        rows
    }

    /// All stored cells, keyed by address
    pub fn cells(&self) -> &BTreeMap<CellKey, Cell> {
        &self.cells
    }

    /// Value of a cell; missing cells read as zero
    pub fn cell_value(&self, category_id: CategoryId, period: Period) -> Money {
        self.cells
            .get(&CellKey::new(category_id, period))
            .map(|cell| cell.value)
            .unwrap_or_default()
    }

    pub fn start_period(&self) -> Period {
        self.start_period
    }

    pub fn end_period(&self) -> Period {
        self.end_period
    }

    pub fn focused_cell(&self) -> Option<CellPosition> {
        self.focused_cell
    }

    pub fn opening_balance(&self) -> Money {
        self.opening_balance
    }

    /// Months from start to end period inclusive
    pub fn months(&self) -> Vec<Period> {
        months_between(self.start_period, self.end_period)
    }
}

fn normalize_categories(categories: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    let mut categories: Vec<Category> = categories
        .into_iter()
        .filter(|category| {
            let first = seen.insert(category.id);
            if !first {
                warn!(id = %category.id, name = %category.name, "duplicate category id dropped");
            }
            first
        })
        .collect();

    let groups = [
        (CategoryType::Income, ParentCategoryId::Income),
        (CategoryType::Income, ParentCategoryId::Expenses),
        (CategoryType::Expense, ParentCategoryId::Income),
        (CategoryType::Expense, ParentCategoryId::Expenses),
    ];

    for (kind, parent_id) in groups {
        let mut members: Vec<usize> = (0..categories.len())
            .filter(|&i| categories[i].same_group(kind, parent_id))
            .collect();
        // Stable, so ties keep insertion order.
        members.sort_by_key(|&i| categories[i].order);

        let mut next = i32::MIN;
        for i in members {
            let category = &mut categories[i];
            if category.order < next {
                warn!(id = %category.id, from = category.order, to = next, "category order reassigned");
                category.order = next;
            }
            next = category.order.saturating_add(1);
        }
    }

    categories
}

impl Default for BudgetState {
    /// The default categories over January to December 2024, opening at zero
    fn default() -> Self {
        Self::new(
            default_categories(),
            DEFAULT_START_PERIOD,
            DEFAULT_END_PERIOD,
            Money::zero(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, kind: CategoryType, order: i32) -> Category {
        Category::new(name, kind, kind.default_parent(), order)
    }

    #[test]
    fn test_default_state() {
        let state = BudgetState::default();
        assert_eq!(state.income_categories().len(), 5);
        assert_eq!(state.expense_categories().len(), 4);
        assert_eq!(state.months().len(), 12);
        assert_eq!(state.start_period(), Period::new(0, 2024));
        assert_eq!(state.end_period(), Period::new(11, 2024));
        assert!(state.focused_cell().is_none());
        assert!(state.opening_balance().is_zero());
    }

    #[test]
    fn test_new_collapses_inverted_range() {
        let state = BudgetState::new(
            Vec::new(),
            Period::new(6, 2024),
            Period::new(2, 2024),
            Money::zero(),
        );
        assert_eq!(state.end_period(), Period::new(6, 2024));
        assert_eq!(state.months(), vec![Period::new(6, 2024)]);
    }

    #[test]
    fn test_sorted_categories() {
        let first = category("First", CategoryType::Income, 1);
        let second = category("Second", CategoryType::Income, 2);
        let zero = category("Zero", CategoryType::Income, 0);
        let expense = category("Rent", CategoryType::Expense, 0);

        let state = BudgetState::new(
            vec![first, expense, second, zero],
            DEFAULT_START_PERIOD,
            DEFAULT_END_PERIOD,
            Money::zero(),
        );

        let names: Vec<_> = state
            .income_categories()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zero", "First", "Second"]);

        let rows: Vec<_> = state.grid_rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(rows, vec!["Zero", "First", "Second", "Rent"]);
    }

    #[test]
    fn test_new_drops_duplicate_ids() {
        let sales = category("Sales", CategoryType::Income, 0);
        let mut copy = sales.clone();
        copy.order = 99;

        let state = BudgetState::new(
            vec![sales.clone(), copy],
            DEFAULT_START_PERIOD,
            DEFAULT_END_PERIOD,
            Money::zero(),
        );

        assert_eq!(state.categories().len(), 1);
        assert_eq!(state.category(sales.id).unwrap().order, 0);
    }

    #[test]
    fn test_new_makes_group_orders_unique() {
        let a = category("A", CategoryType::Income, 0);
        let b = category("B", CategoryType::Income, 0);
        let c = category("C", CategoryType::Income, 1);
        let rent = category("Rent", CategoryType::Expense, 0);

        let state = BudgetState::new(
            vec![a, b, c, rent],
            DEFAULT_START_PERIOD,
            DEFAULT_END_PERIOD,
            Money::zero(),
        );

        let rows: Vec<_> = state
            .income_categories()
            .iter()
            .map(|c| (c.name.as_str(), c.order))
            .collect();
        assert_eq!(rows, vec![("A", 0), ("B", 1), ("C", 2)]);
        assert_eq!(state.expense_categories()[0].order, 0);
    }

    #[test]
    fn test_missing_cell_reads_zero() {
        let state = BudgetState::default();
        assert!(state
            .cell_value(CategoryId::new(), Period::new(0, 2024))
            .is_zero());
    }

    #[test]
    fn test_find_category_by_name() {
        let state = BudgetState::default();
        let found = state.find_category_by_name("cloud hosting").unwrap();
        assert_eq!(found.name, "Cloud Hosting");
        assert_eq!(found.parent_id, ParentCategoryId::Expenses);
        assert!(state.find_category_by_name("Rent").is_none());
    }
}
