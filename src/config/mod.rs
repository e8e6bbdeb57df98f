//! Configuration module for budget-builder
//!
//! This module provides configuration management including:
//! - Platform config directory resolution
//! - Settings persistence and the store they seed

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
