//! budget-builder - In-memory monthly budget grid engine
//!
//! This library holds the state behind a spreadsheet-like budget: income and
//! expense categories as rows, a contiguous range of months as columns, a
//! sparse set of cell values, and the totals and running balance derived
//! from them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Amounts, months, categories, cells and the canonical state
//! - `store`: The budget store, its totals and grid intents
//! - `reports`: Render-ready views of a budget
//! - `display`: Terminal table formatting
//! - `export`: CSV, JSON and YAML exports
//! - `config`: Configuration and path management
//! - `cli`: Command handlers and the budget script language
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use budget_builder::models::Period;
//! use budget_builder::store::BudgetStore;
//!
//! let mut store = BudgetStore::new();
//! let sales = store.income_categories()[1].id;
//! let jan = Period::new(0, 2024);
//!
//! store.set_opening_balance(1000.0);
//! store.set_cell_value(sales, jan, 5000.0);
//!
//! let totals = store.totals();
//! assert_eq!(totals.closing_balance(jan).as_f64(), 6000.0);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod store;

pub use error::{BudgetError, BudgetResult};
pub use store::BudgetStore;
