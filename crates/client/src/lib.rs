//! Client for a personal finance tracker.
//!
//! [`client`] speaks HTTP to the transactions API, [`normalize`] turns its
//! responses into engine types, and [`store`] keeps the synchronized
//! snapshot that every view is computed from.

pub mod client;
pub mod config;
pub mod error;
pub mod normalize;
pub mod report;
pub mod store;

pub use client::{ClientError, HttpTransport, Transport};
pub use error::{AppError, Result};
pub use store::{Snapshot, Store, SyncError, SyncState, SyncStatus};
