//! Wire records to engine transactions and back.

use api_types::transaction::{
    TransactionListing, TransactionPayload, TransactionRecord, TransactionType,
};
use engine::{
    EngineError, Ledger, Money, NewTransaction, Transaction, TransactionId, TransactionKind,
    resolve_timestamp,
};
use serde_json::Value;
use tracing::warn;

/// Turns either listing shape into a [`Ledger`].
///
/// In the split shape a record's kind comes from the list it sits in. In the
/// flat shape every record must carry its own `type`. Records without a
/// usable kind or timestamp are logged and left out.
pub fn normalize_listing(listing: TransactionListing) -> Ledger {
    match listing {
        TransactionListing::Flat(records) => Ledger::from_transactions(
            records
                .into_iter()
                .filter_map(|record| {
                    keep_or_skip(record_kind(&record).and_then(|kind| ingest(record, kind)))
                }),
        ),
        TransactionListing::Split { income, expenses } => Ledger {
            income: ingest_all(income, TransactionKind::Income),
            expenses: ingest_all(expenses, TransactionKind::Expense),
        },
    }
}

fn ingest_all(records: Vec<TransactionRecord>, kind: TransactionKind) -> Vec<Transaction> {
    records
        .into_iter()
        .filter_map(|record| keep_or_skip(ingest(record, kind)))
        .collect()
}

fn keep_or_skip(result: Result<Transaction, EngineError>) -> Option<Transaction> {
    result
        .inspect_err(|err| warn!(error = %err, "skipping transaction"))
        .ok()
}

fn record_kind(record: &TransactionRecord) -> Result<TransactionKind, EngineError> {
    let kind = record.kind.as_deref().ok_or_else(|| {
        EngineError::InvalidKind(format!("missing type for transaction {}", record.id))
    })?;
    TransactionKind::try_from(kind).map_err(|err| match err {
        EngineError::InvalidKind(detail) => {
            EngineError::InvalidKind(format!("transaction {}: {detail}", record.id))
        }
        other => other,
    })
}

fn ingest(record: TransactionRecord, kind: TransactionKind) -> Result<Transaction, EngineError> {
    let occurred_at = resolve_timestamp(record.created_at.as_deref(), record.date.as_deref())
        .map_err(|err| match err {
            EngineError::InvalidTimestamp(detail) => {
                EngineError::InvalidTimestamp(format!("transaction {}: {detail}", record.id))
            }
            other => other,
        })?;

    Ok(Transaction::new(
        TransactionId::from(record.id.to_string()),
        kind,
        coerce_amount(&record.amount),
        record.category.unwrap_or_default(),
        record.description.unwrap_or_default(),
        occurred_at,
    ))
}

/// Numbers and numeric strings become cents; anything else counts as zero.
pub fn coerce_amount(value: &Value) -> Money {
    match value {
        Value::Number(n) => n.as_f64().and_then(Money::from_major).unwrap_or(Money::ZERO),
        Value::String(s) => Money::coerce(s),
        _ => Money::ZERO,
    }
}

pub fn kind_to_wire(kind: TransactionKind) -> TransactionType {
    match kind {
        TransactionKind::Income => TransactionType::Income,
        TransactionKind::Expense => TransactionType::Expense,
    }
}

/// Request body for create and update.
pub fn to_payload(tx: &NewTransaction) -> TransactionPayload {
    TransactionPayload {
        kind: kind_to_wire(tx.kind),
        amount: tx.amount.to_major(),
        description: tx.description.clone(),
        category: tx.category.label().to_string(),
        date: tx.date,
    }
}
