//! YAML Export functionality
//!
//! Exports a budget to YAML for a human-readable copy.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::BudgetExport;
use crate::models::BudgetState;

/// Export a budget to YAML
pub fn export_full_yaml<W: Write>(state: &BudgetState, writer: &mut W) -> BudgetResult<()> {
    let export = BudgetExport::from_state(state);

    writeln!(writer, "# budget-builder export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| {
            writeln!(
                writer,
                "# Range: {} to {}",
                export.start_period, export.end_period
            )
        })
        .and_then(|_| writeln!(writer))
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use crate::store::BudgetStore;

    #[test]
    fn test_yaml_export() {
        let mut store = BudgetStore::new();
        let salaries = store.state().find_category_by_name("Salaries & Wages").unwrap().id;
        store.set_cell_value(salaries, Period::new(1, 2024), 3200.0);

        let mut output = Vec::new();
        export_full_yaml(store.state(), &mut output).unwrap();

        let yaml = String::from_utf8(output).unwrap();
        assert!(yaml.starts_with("# budget-builder export"));
        assert!(yaml.contains("# Range: January 2024 to December 2024"));
        assert!(yaml.contains("Salaries & Wages"));
        assert!(yaml.contains("schema_version"));
    }
}
