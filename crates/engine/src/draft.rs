//! Form input and its validation.
//!
//! A [`TransactionDraft`] holds what a user typed. [`TransactionDraft::validate`]
//! turns it into a [`NewTransaction`] or says which field is wrong, without
//! any I/O.

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::{Category, Money, Transaction, TransactionKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{category}\" is not a valid {kind} category")]
    CategoryMismatch {
        category: String,
        kind: TransactionKind,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: Option<TransactionKind>,
    pub amount: String,
    pub description: String,
    pub category: String,
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
}

/// A validated draft, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Money,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        self.validate_on(Local::now().date_naive())
    }

    /// Same as [`validate`](Self::validate) with an explicit "today".
    pub fn validate_on(&self, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
        let kind = self.kind.ok_or(ValidationError::MissingField("type"))?;

        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(ValidationError::MissingField("amount"));
        }
        let amount: Money = amount
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(amount.to_string()))?;
        if !amount.is_positive() {
            return Err(ValidationError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingField("description"));
        }

        let label = self.category.trim();
        if label.is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        let category = Category::from_label(label)
            .filter(|c| c.kind() == kind)
            .ok_or_else(|| ValidationError::CategoryMismatch {
                category: label.to_string(),
                kind,
            })?;

        Ok(NewTransaction {
            kind,
            amount,
            description: description.to_string(),
            category,
            date: self.date.unwrap_or(today),
        })
    }
}

impl From<&Transaction> for TransactionDraft {
    /// Prefills an edit form from an existing transaction.
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: Some(tx.kind),
            amount: tx.amount.to_string(),
            description: tx.description.clone(),
            category: tx.category.clone(),
            date: Some(tx.day()),
        }
    }
}
