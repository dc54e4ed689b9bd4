//! Fixtures and an in-memory backend for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use crate::api::transactions::{ApiError, CreateTransactionRequest, TransactionsApi};
use crate::models::{Transaction, TransactionId, TransactionType};

/// A deterministic timestamp `n` hours after a fixed epoch.
pub fn timestamp(n: u64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 10, 1, 0, 0, 0).unwrap() + Duration::hours(n as i64)
}

fn transaction(id: u64, kind: TransactionType, price: Decimal) -> Transaction {
    Transaction {
        id: TransactionId::Number(id),
        description: format!("Transaction {}", id),
        kind,
        price,
        category: "General".to_string(),
        created_at: timestamp(id),
    }
}

pub fn income(id: u64, price: Decimal) -> Transaction {
    transaction(id, TransactionType::Income, price)
}

pub fn outcome(id: u64, price: Decimal) -> Transaction {
    transaction(id, TransactionType::Outcome, price)
}

impl Transaction {
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ListGate {
    BeforeSnapshot,
    AfterSnapshot,
}

#[derive(Default)]
struct FakeBackend {
    records: Vec<Transaction>,
    next_id: u64,
    list_error: Option<ApiError>,
    create_error: Option<ApiError>,
    echo_created_at: Option<DateTime<Utc>>,
    list_calls: Vec<Option<String>>,
    create_calls: usize,
    list_gate: Option<(ListGate, Arc<Notify>)>,
    create_gate: Option<(String, Arc<Notify>)>,
}

/// An in-memory `transactions` resource. Clones share the same backend, so a
/// test can keep a handle while the store owns another.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeBackend>>,
}

impl FakeApi {
    /// `records` are served in the given order, so pass them newest first.
    pub fn with_records(records: Vec<Transaction>) -> Self {
        let api = FakeApi::default();
        api.set_records(records);
        api
    }

    pub fn set_records(&self, records: Vec<Transaction>) {
        let mut backend = self.inner.lock().unwrap();
        let max_id = records
            .iter()
            .filter_map(|tx| match tx.id {
                TransactionId::Number(id) => Some(id),
                TransactionId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        backend.next_id = backend.next_id.max(max_id + 1);
        backend.records = records;
    }

    pub fn records(&self) -> Vec<Transaction> {
        self.inner.lock().unwrap().records.clone()
    }

    pub fn fail_lists_with(&self, error: ApiError) {
        self.inner.lock().unwrap().list_error = Some(error);
    }

    pub fn fail_creates_with(&self, error: ApiError) {
        self.inner.lock().unwrap().create_error = Some(error);
    }

    /// Answer creates with this `createdAt` instead of the client's.
    pub fn echo_created_at(&self, created_at: DateTime<Utc>) {
        self.inner.lock().unwrap().echo_created_at = Some(created_at);
    }

    /// Hold list requests until the returned handle is notified. The response
    /// is what the backend held when the request arrived.
    pub fn hold_lists_after_snapshot(&self) -> Arc<Notify> {
        self.hold_lists(ListGate::AfterSnapshot)
    }

    /// Hold list requests until the returned handle is notified. The response
    /// is what the backend holds when the request is released.
    pub fn hold_lists_before_snapshot(&self) -> Arc<Notify> {
        self.hold_lists(ListGate::BeforeSnapshot)
    }

    fn hold_lists(&self, mode: ListGate) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner.lock().unwrap().list_gate = Some((mode, notify.clone()));
        notify
    }

    /// Hold creates whose description is `description` until the returned
    /// handle is notified. Ids are assigned when the create is released.
    pub fn hold_creates_of(&self, description: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.inner.lock().unwrap().create_gate = Some((description.to_string(), notify.clone()));
        notify
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.inner.lock().unwrap().list_calls.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.inner.lock().unwrap().create_calls
    }

    fn snapshot(&self, query: Option<&str>) -> Vec<Transaction> {
        let backend = self.inner.lock().unwrap();
        let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
        backend
            .records
            .iter()
            .filter(|tx| match &needle {
                Some(needle) => {
                    tx.description.to_lowercase().contains(needle)
                        || tx.category.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TransactionsApi for FakeApi {
    async fn list_transactions(&self, query: Option<&str>) -> Result<Vec<Transaction>, ApiError> {
        let gate = {
            let mut backend = self.inner.lock().unwrap();
            backend.list_calls.push(query.map(str::to_string));
            if let Some(error) = &backend.list_error {
                return Err(error.clone());
            }
            backend.list_gate.clone()
        };

        match gate {
            Some((ListGate::AfterSnapshot, notify)) => {
                let records = self.snapshot(query);
                notify.notified().await;
                Ok(records)
            }
            Some((ListGate::BeforeSnapshot, notify)) => {
                notify.notified().await;
                Ok(self.snapshot(query))
            }
            None => Ok(self.snapshot(query)),
        }
    }

    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let gate = {
            let mut backend = self.inner.lock().unwrap();
            backend.create_calls += 1;
            if let Some(error) = &backend.create_error {
                return Err(error.clone());
            }
            backend
                .create_gate
                .clone()
                .filter(|(description, _)| *description == request.description)
        };
        if let Some((_, notify)) = gate {
            notify.notified().await;
        }

        let mut backend = self.inner.lock().unwrap();
        backend.next_id = backend.next_id.max(1);
        let id = backend.next_id;
        backend.next_id += 1;

        let created = Transaction {
            id: TransactionId::Number(id),
            description: request.description.clone(),
            kind: request.kind,
            price: request.price,
            category: request.category.clone(),
            created_at: backend.echo_created_at.unwrap_or(request.created_at),
        };
        backend.records.insert(0, created.clone());
        Ok(created)
    }
}
