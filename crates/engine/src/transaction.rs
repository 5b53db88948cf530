//! Transaction primitives.
//!
//! A `Transaction` is built once at ingestion: the amount is already coerced
//! to cents and the timestamp already resolved. Aggregations never look at
//! raw server fields.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, YearMonth};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidKind(other.to_string())),
        }
    }
}

/// Opaque server-assigned identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// Always >= 0, the kind carries the sign.
    pub amount: Money,
    pub category: String,
    pub description: String,
    /// Wall-clock time in the offset the server reported it in.
    pub occurred_at: NaiveDateTime,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            kind,
            amount: amount.abs(),
            category: category.into(),
            description: description.into(),
            occurred_at,
        }
    }

    /// `+amount` for income, `-amount` for expense.
    #[must_use]
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.occurred_at.date()
    }

    #[must_use]
    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.occurred_at.date())
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a single server timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]` and
/// a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(raw: &str) -> ResultEngine<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| EngineError::InvalidTimestamp(raw.to_string()))
}

/// Resolves the one timestamp a transaction is bucketed by.
///
/// `created_at` wins when it is present and parseable, otherwise `date` is
/// used.
pub fn resolve_timestamp(
    created_at: Option<&str>,
    date: Option<&str>,
) -> ResultEngine<NaiveDateTime> {
    let created = created_at.filter(|s| !s.trim().is_empty());
    let date = date.filter(|s| !s.trim().is_empty());

    match (created.map(parse_timestamp), date) {
        (Some(Ok(ts)), _) => Ok(ts),
        (_, Some(date)) => parse_timestamp(date),
        (Some(Err(err)), None) => Err(err),
        (None, None) => Err(EngineError::InvalidTimestamp(
            "neither created_at nor date present".to_string(),
        )),
    }
}
