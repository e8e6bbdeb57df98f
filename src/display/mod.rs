//! Display formatting for terminal output

pub mod grid;

pub use grid::format_budget_grid;
