//! User settings for budget-builder
//!
//! Settings decide how a fresh budget starts out: its visible range, the
//! opening balance and whether the default categories are seeded.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::state::{DEFAULT_END_PERIOD, DEFAULT_START_PERIOD};
use crate::models::{default_categories, BudgetState, Money, Period};
use crate::store::BudgetStore;

/// User settings for budget-builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// First visible month of a new budget
    #[serde(default = "default_start_period")]
    pub start_period: Period,

    /// Last visible month of a new budget
    #[serde(default = "default_end_period")]
    pub end_period: Period,

    /// Balance carried into the first month
    #[serde(default)]
    pub opening_balance: f64,

    /// Whether new budgets start with the built-in income and expense rows
    #[serde(default = "default_seed")]
    pub seed_default_categories: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_start_period() -> Period {
    DEFAULT_START_PERIOD
}

fn default_end_period() -> Period {
    DEFAULT_END_PERIOD
}

fn default_seed() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            start_period: default_start_period(),
            end_period: default_end_period(),
            opening_balance: 0.0,
            seed_default_categories: default_seed(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Defaults are not written; callers decide when to persist.
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            debug!(path = %settings_path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject a range whose end precedes its start
    pub fn validate(&self) -> Result<(), BudgetError> {
        if self.end_period < self.start_period {
            return Err(BudgetError::Config(format!(
                "end_period ({}) is before start_period ({})",
                self.end_period, self.start_period
            )));
        }
        Ok(())
    }

    /// A fresh store configured by these settings
    pub fn build_store(&self) -> BudgetStore {
        let categories = if self.seed_default_categories {
            default_categories()
        } else {
            Vec::new()
        };

        BudgetStore::from_state(BudgetState::new(
            categories,
            self.start_period,
            self.end_period,
            Money::from_f64(self.opening_balance),
        ))
    }
}
