//! The session's authoritative transaction list.
//!
//! [`TransactionStore`] is the only writer of the list. Every change, either a
//! full replacement after a fetch or a prepend after a create, is applied as a
//! single update of a `watch` channel, so readers only ever see whole
//! snapshots. Readers that need to react to changes hold a
//! [`TransactionsView`].

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::transactions::{CreateTransactionRequest, TransactionsApi};
use crate::models::{NewTransaction, Summary, Transaction, TransactionId};
use crate::services::summary_service::summarize;
use crate::utils::errors::StoreError;

#[derive(Debug, Default)]
struct StoreState {
    transactions: Arc<Vec<Transaction>>,
    /// Bumped on every list change.
    revision: u64,
    /// Bumped on every applied create.
    create_seq: u64,
    fetches_in_flight: usize,
    /// Creates applied while a fetch was in flight, tagged with their
    /// `create_seq`. Cleared once no fetch is in flight.
    overlapping_creates: Vec<(u64, Transaction)>,
}

/// Owns the transaction list and mediates all reads and writes to the backend
pub struct TransactionStore<A> {
    api: A,
    state: watch::Sender<StoreState>,
}

impl<A: TransactionsApi> TransactionStore<A> {
    /// Create a store with an empty list. Nothing is fetched until
    /// [`fetch_transactions`](Self::fetch_transactions) is called.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { api, state }
    }

    /// Replace the local list with the backend's, newest first.
    ///
    /// A blank `query` fetches everything. On failure the list is left as it
    /// was. For an unfiltered fetch, records created locally while it was in
    /// flight are kept in front of the response when the response does not
    /// include them yet. A filtered fetch installs exactly the response.
    pub async fn fetch_transactions(&self, query: Option<&str>) -> Result<(), StoreError> {
        let guard = FetchGuard::begin(&self.state);
        let filtered = query.is_some_and(|q| !q.trim().is_empty());
        debug!("Fetching transactions (query: {:?})", query);

        let fetched = match self.api.list_transactions(query).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Failed to fetch transactions: {}", e);
                return Err(e.into());
            }
        };

        let started_at = guard.started_at;
        let mut kept = 0;
        self.state.send_if_modified(|state| {
            let mut list: Vec<Transaction> = {
                let fetched_ids: HashSet<&TransactionId> = fetched.iter().map(|tx| &tx.id).collect();
                state
                    .overlapping_creates
                    .iter()
                    .rev()
                    .filter(|(seq, tx)| {
                        !filtered && *seq > started_at && !fetched_ids.contains(&tx.id)
                    })
                    .map(|(_, tx)| tx.clone())
                    .collect()
            };
            kept = list.len();
            list.extend(fetched);

            state.transactions = Arc::new(list);
            state.revision += 1;
            true
        });

        if kept > 0 {
            info!("Kept {} transaction(s) created during the fetch", kept);
        }
        info!("Loaded {} transaction(s)", self.state.borrow().transactions.len());
        Ok(())
    }

    /// Validate `input`, send it to the backend and put the returned record
    /// at the front of the list.
    ///
    /// Invalid input is rejected before any request is made. On failure the
    /// list is left as it was; clearing the caller's form is up to the caller.
    pub async fn create_transaction(&self, input: NewTransaction) -> Result<Transaction, StoreError> {
        if let Err(e) = input.validate() {
            debug!("Rejected new transaction: {}", e);
            return Err(e.into());
        }

        let request = CreateTransactionRequest::new(input, Utc::now());
        let created = match self.api.create_transaction(&request).await {
            Ok(created) => created,
            Err(e) => {
                warn!("Failed to create transaction: {}", e);
                return Err(e.into());
            }
        };

        self.state.send_if_modified(|state| {
            let mut list = Vec::with_capacity(state.transactions.len() + 1);
            list.push(created.clone());
            list.extend(state.transactions.iter().cloned());

            state.transactions = Arc::new(list);
            state.revision += 1;
            state.create_seq += 1;
            if state.fetches_in_flight > 0 {
                state
                    .overlapping_creates
                    .push((state.create_seq, created.clone()));
            }
            true
        });

        info!(
            "Created transaction {} ({} {} in {})",
            created.id, created.kind, created.price, created.category
        );
        Ok(created)
    }

    /// Current list, newest first
    pub fn transactions(&self) -> Arc<Vec<Transaction>> {
        self.state.borrow().transactions.clone()
    }

    /// Summary of the current list
    pub fn summary(&self) -> Summary {
        summarize(&self.transactions())
    }

    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    pub fn is_fetching(&self) -> bool {
        self.state.borrow().fetches_in_flight > 0
    }

    /// Observe list changes from another task
    pub fn subscribe(&self) -> TransactionsView {
        TransactionsView {
            receiver: self.state.subscribe(),
            cached: None,
        }
    }
}

/// Tracks one in-flight fetch. Dropping it, including when the fetch future
/// is cancelled, releases the fetch's bookkeeping.
struct FetchGuard<'a> {
    state: &'a watch::Sender<StoreState>,
    started_at: u64,
}

impl<'a> FetchGuard<'a> {
    fn begin(state: &'a watch::Sender<StoreState>) -> Self {
        let mut started_at = 0;
        state.send_if_modified(|state| {
            state.fetches_in_flight += 1;
            started_at = state.create_seq;
            false
        });
        Self { state, started_at }
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            state.fetches_in_flight = state.fetches_in_flight.saturating_sub(1);
            if state.fetches_in_flight == 0 {
                state.overlapping_creates.clear();
            }
            false
        });
    }
}

/// Read-only handle on the store's list with a summary memoized per revision
pub struct TransactionsView {
    receiver: watch::Receiver<StoreState>,
    cached: Option<(u64, Summary)>,
}

impl TransactionsView {
    pub fn transactions(&self) -> Arc<Vec<Transaction>> {
        self.receiver.borrow().transactions.clone()
    }

    pub fn revision(&self) -> u64 {
        self.receiver.borrow().revision
    }

    /// Summary of the current list. Recomputed only when the list changed
    /// since the last call.
    pub fn summary(&mut self) -> Summary {
        let (revision, transactions) = {
            let state = self.receiver.borrow();
            (state.revision, state.transactions.clone())
        };

        match self.cached {
            Some((cached_revision, summary)) if cached_revision == revision => summary,
            _ => {
                let summary = summarize(&transactions);
                self.cached = Some((revision, summary));
                summary
            }
        }
    }

    /// Whether the list changed since it was last marked seen
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next list change and mark it seen. Returns `false` once
    /// the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}
