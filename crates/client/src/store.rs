//! Client-side synchronization of the transaction list.
//!
//! A [`Store`] holds the last snapshot the server confirmed together with
//! the status of the latest operation. Writes are never applied locally:
//! every accepted create, update or delete is followed by a full re-fetch,
//! and the snapshot is only ever replaced as a whole.
//!
//! Consumers read the state with [`Store::state`] or watch it through
//! [`Store::subscribe`].

use std::{future::Future, mem, sync::Arc};

use engine::{
    Ledger, NewTransaction, Totals, Transaction, TransactionDraft, TransactionId, ValidationError,
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    client::{ClientError, Transport},
    normalize::{normalize_listing, to_payload},
};

pub const FETCH_FALLBACK: &str = "Failed to fetch transactions";
pub const CREATE_FALLBACK: &str = "Failed to add transaction";
pub const UPDATE_FALLBACK: &str = "Failed to update transaction";
pub const DELETE_FALLBACK: &str = "Failed to delete transaction";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transaction {0} not found")]
    NotFound(TransactionId),
    #[error("{0}")]
    Transport(String),
    /// The write went through but the follow-up fetch did not.
    #[error("saved, but reloading failed: {0}")]
    Stale(String),
    #[error("unreadable transaction data: {0}")]
    Decode(String),
}

/// Everything derived from one successful fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub ledger: Ledger,
    pub totals: Totals,
}

impl Snapshot {
    pub fn new(ledger: Ledger) -> Self {
        let totals = ledger.totals();
        Self { ledger, totals }
    }

    pub fn find(&self, id: &TransactionId) -> Option<&Transaction> {
        self.ledger.find(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    /// A write succeeded but the snapshot predates it.
    Stale(String),
}

#[derive(Clone, Debug, Default)]
pub struct SyncState {
    pub status: SyncStatus,
    pub snapshot: Arc<Snapshot>,
    /// Operations started and not yet finished.
    pub in_flight: usize,
}

impl SyncState {
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SyncStatus::Error(message) | SyncStatus::Stale(message) => Some(message),
            SyncStatus::Idle | SyncStatus::Loading => None,
        }
    }
}

pub struct Store<T> {
    transport: T,
    state: watch::Sender<SyncState>,
}

impl<T: Transport> Store<T> {
    pub fn new(transport: T) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        Self { transport, state }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.state.borrow().snapshot)
    }

    pub fn status(&self) -> SyncStatus {
        self.state.borrow().status.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().is_busy()
    }

    /// Looks a transaction up in the current snapshot only.
    pub fn find(&self, id: &TransactionId) -> Option<Transaction> {
        self.state.borrow().snapshot.find(id).cloned()
    }

    /// Replaces the snapshot with the server's current list.
    ///
    /// On failure the previous snapshot is kept and the status carries the
    /// error.
    pub async fn fetch(&self) -> Result<Arc<Snapshot>, SyncError> {
        let op = self.begin("fetch");
        match self.load().await {
            Ok(snapshot) => {
                info!(
                    income = snapshot.ledger.income.len(),
                    expenses = snapshot.ledger.expenses.len(),
                    "transactions fetched"
                );
                op.succeed(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(err) => {
                warn!(error = %err, "fetch failed");
                op.fail(SyncStatus::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn create(&self, draft: &TransactionDraft) -> Result<Arc<Snapshot>, SyncError> {
        let tx = validated(draft)?;
        let payload = to_payload(&tx);
        self.write("create", CREATE_FALLBACK, self.transport.create(&payload))
            .await
    }

    pub async fn update(
        &self,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<Arc<Snapshot>, SyncError> {
        let tx = validated(draft)?;
        self.require(id)?;
        let payload = to_payload(&tx);
        self.write("update", UPDATE_FALLBACK, self.transport.update(id, &payload))
            .await
    }

    pub async fn delete(&self, id: &TransactionId) -> Result<Arc<Snapshot>, SyncError> {
        self.require(id)?;
        self.write("delete", DELETE_FALLBACK, self.transport.delete(id))
            .await
    }

    /// Returns the transaction, fetching once if the snapshot lacks it.
    pub async fn ensure_loaded(&self, id: &TransactionId) -> Result<Transaction, SyncError> {
        if let Some(tx) = self.find(id) {
            return Ok(tx);
        }
        self.fetch()
            .await?
            .find(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.clone()))
    }

    async fn write<F>(
        &self,
        name: &'static str,
        fallback: &'static str,
        request: F,
    ) -> Result<Arc<Snapshot>, SyncError>
    where
        F: Future<Output = Result<(), ClientError>>,
    {
        let op = self.begin(name);

        if let Err(err) = request.await {
            let err = SyncError::Transport(err.message().unwrap_or_else(|| fallback.to_string()));
            warn!(op = name, error = %err, "request failed");
            op.fail(SyncStatus::Error(err.to_string()));
            return Err(err);
        }
        debug!(op = name, "request accepted, reloading");

        match self.load().await {
            Ok(snapshot) => {
                info!(op = name, total = snapshot.ledger.len(), "transactions synced");
                op.succeed(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(err) => {
                warn!(op = name, error = %err, "reload after write failed");
                let err = SyncError::Stale(err.to_string());
                op.fail(SyncStatus::Stale(err.to_string()));
                Err(err)
            }
        }
    }

    async fn load(&self) -> Result<Arc<Snapshot>, SyncError> {
        let listing = self.transport.list().await.map_err(|err| match err {
            ClientError::Decode(detail) => SyncError::Decode(detail),
            other => SyncError::Transport(
                other
                    .message()
                    .unwrap_or_else(|| FETCH_FALLBACK.to_string()),
            ),
        })?;
        Ok(Arc::new(Snapshot::new(normalize_listing(listing))))
    }

    fn require(&self, id: &TransactionId) -> Result<(), SyncError> {
        if self.state.borrow().snapshot.ledger.contains(id) {
            return Ok(());
        }
        debug!(%id, "transaction not in snapshot");
        Err(SyncError::NotFound(id.clone()))
    }

    fn begin(&self, name: &'static str) -> InFlight<'_> {
        let mut prior = SyncStatus::Idle;
        self.state.send_modify(|state| {
            prior = match mem::replace(&mut state.status, SyncStatus::Loading) {
                SyncStatus::Loading => SyncStatus::Idle,
                other => other,
            };
            state.in_flight += 1;
        });
        debug!(op = name, "sync started");
        InFlight {
            state: &self.state,
            prior,
            settled: false,
        }
    }
}

fn validated(draft: &TransactionDraft) -> Result<NewTransaction, SyncError> {
    draft.validate().map_err(|err| {
        debug!(error = %err, "draft rejected");
        SyncError::from(err)
    })
}

/// Keeps `in_flight` honest even when the operation's future is dropped.
struct InFlight<'a> {
    state: &'a watch::Sender<SyncState>,
    prior: SyncStatus,
    settled: bool,
}

impl InFlight<'_> {
    fn succeed(mut self, snapshot: Arc<Snapshot>) {
        self.state.send_modify(|state| {
            state.snapshot = snapshot;
            state.status = SyncStatus::Idle;
        });
        self.settled = true;
    }

    fn fail(mut self, status: SyncStatus) {
        self.state.send_modify(|state| state.status = status);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let settled = self.settled;
        let prior = &self.prior;
        self.state.send_modify(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            // Abandoned with nothing else running: undo the Loading mark.
            if !settled && state.in_flight == 0 && state.status == SyncStatus::Loading {
                state.status = prior.clone();
            }
        });
    }
}
