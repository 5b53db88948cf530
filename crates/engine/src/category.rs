//! Client-owned category enumeration.
//!
//! Income and expense categories are disjoint. Transactions coming from the
//! server keep their label verbatim; this list is only used to validate what
//! the client sends.

use std::fmt;

use crate::{EngineError, TransactionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Salary,
    Freelance,
    Investment,
    OtherIncome,
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    BillsAndUtilities,
    Healthcare,
    Education,
    OtherExpense,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Salary,
        Self::Freelance,
        Self::Investment,
        Self::OtherIncome,
        Self::FoodAndDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsAndUtilities,
        Self::Healthcare,
        Self::Education,
        Self::OtherExpense,
    ];

    /// Display label, which is also the value sent to the server.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::OtherIncome => "Other Income",
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsAndUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::OtherExpense => "Other Expense",
        }
    }

    #[must_use]
    pub const fn kind(self) -> TransactionKind {
        match self {
            Self::Salary | Self::Freelance | Self::Investment | Self::OtherIncome => {
                TransactionKind::Income
            }
            _ => TransactionKind::Expense,
        }
    }

    /// Categories available for a transaction kind, in menu order.
    pub fn for_kind(kind: TransactionKind) -> impl Iterator<Item = Category> {
        Self::ALL.into_iter().filter(move |c| c.kind() == kind)
    }

    /// Case-insensitive lookup by label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_label(value).ok_or_else(|| EngineError::UnknownCategory(value.to_string()))
    }
}
