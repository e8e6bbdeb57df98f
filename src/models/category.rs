//! Budget category model
//!
//! Categories are the rows of the budget grid. Each belongs to a section
//! (income or expense) under a parent, and carries a display order that is
//! unique within its `(type, parent)` group.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Maximum length of a category name accepted by [`Category::validate`]
pub const MAX_NAME_LEN: usize = 50;

/// Whether a category records money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    Expense,
}

impl CategoryType {
    /// Name given to rows created by "add subcategory"
    pub fn default_category_name(&self) -> &'static str {
        match self {
            Self::Income => "New Income Category",
            Self::Expense => "New Expense Category",
        }
    }

    /// The section parent categories of this type are filed under by default
    pub fn default_parent(&self) -> ParentCategoryId {
        match self {
            Self::Income => ParentCategoryId::Income,
            Self::Expense => ParentCategoryId::Expenses,
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Section a category is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentCategoryId {
    Income,
    Expenses,
}

impl fmt::Display for ParentCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expenses => write!(f, "expenses"),
        }
    }
}

/// A budget line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: CategoryType,

    /// Section parent
    pub parent_id: ParentCategoryId,

    /// Sort order within the `(kind, parent_id)` group
    pub order: i32,

    /// Whether this row is a parent heading rather than a leaf line item
    #[serde(default)]
    pub is_parent: bool,
}

impl Category {
    /// Create a leaf category with a fresh identifier
    pub fn new(
        name: impl Into<String>,
        kind: CategoryType,
        parent_id: ParentCategoryId,
        order: i32,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            kind,
            parent_id,
            order,
            is_parent: false,
        }
    }

    /// Whether this category belongs to the `(kind, parent_id)` group
    pub fn same_group(&self, kind: CategoryType, parent_id: ParentCategoryId) -> bool {
        self.kind == kind && self.parent_id == parent_id
    }

    /// Validate the category name
    ///
    /// The store accepts any name; callers that want strict input run this
    /// first.
    pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
        if name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        Self::validate_name(&self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const DEFAULT_INCOME: &[&str] = &[
    "General Income",
    "Sales",
    "Commission",
    "Training",
    "Consulting",
];

const DEFAULT_EXPENSES: &[&str] = &[
    "Operational Expenses",
    "Management Fees",
    "Cloud Hosting",
    "Salaries & Wages",
];

/// The categories a new budget starts with: income lines first, then
/// expense lines, each group ordered from zero
pub fn default_categories() -> Vec<Category> {
    let income = DEFAULT_INCOME.iter().enumerate().map(|(i, name)| {
        Category::new(*name, CategoryType::Income, ParentCategoryId::Income, i as i32)
    });
    let expenses = DEFAULT_EXPENSES.iter().enumerate().map(|(i, name)| {
        Category::new(
            *name,
            CategoryType::Expense,
            ParentCategoryId::Expenses,
            i as i32,
        )
    });

    income.chain(expenses).collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}
