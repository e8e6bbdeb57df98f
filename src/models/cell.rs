//! Grid cells and their addressing
//!
//! A cell holds the amount of one category in one month. Cells are sparse: a
//! missing cell reads as zero.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;
use super::money::Money;
use super::period::Period;

/// Structured address of a cell
///
/// Ordering groups all cells of a category together, chronologically, which
/// lets a category's cells be found with a single range scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellKey {
    pub category_id: CategoryId,
    pub period: Period,
}

impl CellKey {
    pub fn new(category_id: CategoryId, period: Period) -> Self {
        Self {
            category_id,
            period,
        }
    }
}

/// Stored value of one category in one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub category_id: CategoryId,
    pub period: Period,
    pub value: Money,
}

impl Cell {
    pub fn new(category_id: CategoryId, period: Period, value: Money) -> Self {
        Self {
            category_id,
            period,
            value,
        }
    }

    /// The key this cell is stored under
    pub fn key(&self) -> CellKey {
        CellKey::new(self.category_id, self.period)
    }
}

/// A grid coordinate, used for the focused cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub category_id: CategoryId,
    pub period: Period,
}

impl CellPosition {
    pub fn new(category_id: CategoryId, period: Period) -> Self {
        Self {
            category_id,
            period,
        }
    }

    pub fn month(&self) -> u32 {
        self.period.month()
    }

    pub fn year(&self) -> i32 {
        self.period.year()
    }
}

impl From<CellPosition> for CellKey {
    fn from(position: CellPosition) -> Self {
        CellKey::new(position.category_id, position.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_key_ordering_groups_by_category() {
        let a = CategoryId::new();
        let b = CategoryId::new();
        let (first, second) = if a < b { (a, b) } else { (b, a) };

        let mut keys = vec![
            CellKey::new(second, Period::new(0, 2024)),
            CellKey::new(first, Period::new(5, 2024)),
            CellKey::new(first, Period::new(11, 2023)),
        ];
        keys.sort();

        assert_eq!(keys[0], CellKey::new(first, Period::new(11, 2023)));
        assert_eq!(keys[1], CellKey::new(first, Period::new(5, 2024)));
        assert_eq!(keys[2].category_id, second);
    }

    #[test]
    fn test_cell_key() {
        let id = CategoryId::new();
        let cell = Cell::new(id, Period::new(2, 2024), Money::from_cents(100));
        assert_eq!(cell.key(), CellKey::new(id, Period::new(2, 2024)));
    }

    #[test]
    fn test_position_accessors() {
        let position = CellPosition::new(CategoryId::new(), Period::new(4, 2025));
        assert_eq!(position.month(), 4);
        assert_eq!(position.year(), 2025);
    }
}
