//! Core data models for budget-builder
//!
//! Amounts, months, categories, cells and the canonical budget state.

pub mod category;
pub mod cell;
pub mod ids;
pub mod money;
pub mod period;
pub mod state;

pub use category::{default_categories, Category, CategoryType, ParentCategoryId};
pub use cell::{Cell, CellKey, CellPosition};
pub use ids::CategoryId;
pub use money::{format_currency, parse_numeric_value, round_to_two_decimals, sum_rounded, Money};
pub use period::{
    compare_month_year, format_month_year, generate_month_year_options, month_key, month_name,
    months_between, Period,
};
pub use state::BudgetState;
