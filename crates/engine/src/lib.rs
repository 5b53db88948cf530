//! Aggregation engine for the tally client.
//!
//! Pure, synchronous transformations from a transaction collection to the
//! views a dashboard shows: totals, category rankings, month buckets and
//! chart series. Nothing in this crate performs I/O.

pub use category::Category;
pub use draft::{NewTransaction, TransactionDraft, ValidationError};
pub use error::EngineError;
pub use ledger::Ledger;
pub use money::Money;
pub use month::{YearMonth, month_name};
pub use series::{
    CategorySeries, DailySeries, build_category_series, build_daily_series, palette_color,
};
pub use stats::{
    CategoryShare, CategoryTotal, DEFAULT_TOP_CATEGORIES, MonthBucket, Totals, category_breakdown,
    category_share, compute_totals, group_by_category, group_by_month, highest_category,
    top_categories,
};
pub use transaction::{
    Transaction, TransactionId, TransactionKind, parse_timestamp, resolve_timestamp,
};

mod category;
mod draft;
mod error;
mod ledger;
mod money;
mod month;
mod series;
mod stats;
mod transaction;

type ResultEngine<T> = Result<T, EngineError>;
