use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionType {
        Income,
        Expense,
    }

    impl TransactionType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    /// Transaction identifier as sent by the server.
    ///
    /// Some deployments use integer primary keys, others opaque strings, so
    /// both are accepted.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RecordId {
        Number(i64),
        Text(String),
    }

    impl fmt::Display for RecordId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Number(n) => write!(f, "{n}"),
                Self::Text(s) => f.write_str(s),
            }
        }
    }

    /// A transaction exactly as the server returns it.
    ///
    /// Nothing here is trusted: the type may be missing or unknown, the
    /// amount may be a number, a numeric string or missing, and the timestamp
    /// may live in `created_at`, `date`, or both.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionRecord {
        pub id: RecordId,
        #[serde(rename = "type", default)]
        pub kind: Option<String>,
        #[serde(default)]
        pub amount: serde_json::Value,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        /// Calendar date chosen by the user (`YYYY-MM-DD`).
        #[serde(default)]
        pub date: Option<String>,
        /// Server-assigned creation timestamp.
        #[serde(default)]
        pub created_at: Option<String>,
    }

    /// The two listing shapes observed in practice.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum TransactionListing {
        Flat(Vec<TransactionRecord>),
        Split {
            #[serde(default)]
            income: Vec<TransactionRecord>,
            #[serde(default)]
            expenses: Vec<TransactionRecord>,
        },
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: TransactionListing,
    }

    /// Body of create and update requests.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionPayload {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        /// Major units (e.g. `12.5`), sent as a JSON number.
        pub amount: f64,
        pub description: String,
        pub category: String,
        pub date: NaiveDate,
    }
}

pub mod error {
    use super::*;

    /// Error body returned by the server on non-2xx responses.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ErrorBody {
        #[serde(alias = "message")]
        pub error: String,
    }
}
