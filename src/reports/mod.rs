//! Reports module for budget-builder
//!
//! Flattened views of a budget that the display and export layers render.

pub mod grid;

pub use grid::{GridReport, GridRow, MonthSummary};
