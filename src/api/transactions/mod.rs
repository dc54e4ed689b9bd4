pub mod client;
pub mod models;

use async_trait::async_trait;

use crate::models::Transaction;

pub use client::TransactionsClient;
pub use models::{ApiError, CreateTransactionRequest};

/// The backend resource the transaction store reads from and appends to
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    /// List transactions newest first, optionally filtered by a free-text query
    async fn list_transactions(&self, query: Option<&str>) -> Result<Vec<Transaction>, ApiError>;

    /// Create a transaction and return the record as the backend stored it
    async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError>;
}
