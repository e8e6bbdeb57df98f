//! Grid intents
//!
//! Keyboard and context-menu actions arrive already decoded as a
//! [`GridIntent`] and are resolved against the focused cell.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::BudgetStore;
use crate::models::CellPosition;

/// Focus movement on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Advance to the next month, same as `Right`
    Next,
}

impl Direction {
    /// `(row, column)` step
    fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right | Self::Next => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Next => "next",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "next" | "tab" => Ok(Self::Next),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// A decoded grid action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridIntent {
    Move(Direction),
    AddSubcategory,
    ApplyToAllMonths,
    DeleteCategory,
}

/// Clamp `index + delta` into `0..len`; `len` must be non-zero
fn step(index: Option<usize>, delta: isize, len: usize) -> usize {
    // An entry missing from the grid counts as sitting just before the first.
    let current = index.map_or(-1, |i| i as isize);
    (current + delta).clamp(0, len as isize - 1) as usize
}

impl BudgetStore {
    /// Move the focused cell one step, clamped to the grid edges
    ///
    /// Rows are the income categories followed by the expense categories,
    /// columns the visible months. Returns the new focus, or `None` when there
    /// was no focus or the grid is empty; the state is untouched in that case.
    pub fn move_focus(&mut self, direction: Direction) -> Option<CellPosition> {
        let focus = self.focused_cell()?;
        let (row_delta, column_delta) = direction.delta();

        let position = {
            let rows = self.state().grid_rows();
            let months = self.months();
            if rows.is_empty() || months.is_empty() {
                return None;
            }

            let row = step(
                rows.iter().position(|c| c.id == focus.category_id),
                row_delta,
                rows.len(),
            );
            let column = step(
                months.iter().position(|p| *p == focus.period),
                column_delta,
                months.len(),
            );
            CellPosition::new(rows[row].id, months[column])
        };

        debug!(%direction, category_id = %position.category_id, period = %position.period.key(), "move focus");
        self.set_focused_cell(Some(position));
        Some(position)
    }

    /// Apply an intent to the focused cell
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, intent: GridIntent) -> bool {
        let Some(focus) = self.focused_cell() else {
            debug!(?intent, "intent ignored without focus");
            return false;
        };

        match intent {
            GridIntent::Move(direction) => self.move_focus(direction).is_some(),
            GridIntent::AddSubcategory => self.add_subcategory(focus.category_id).is_some(),
            GridIntent::ApplyToAllMonths => {
                self.apply_to_all_months(focus.category_id, focus.period);
                true
            }
            GridIntent::DeleteCategory => {
                self.delete_category(focus.category_id);
                true
            }
        }
    }
}
