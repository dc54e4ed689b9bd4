//! Personal-finance transaction tracking on top of a REST `transactions`
//! backend: a store that keeps the session's list in sync with the backend,
//! a summary aggregator over that list, and a terminal front end.

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use api::{ApiError, TransactionsApi, TransactionsClient};
pub use config::Config;
pub use models::{NewTransaction, Summary, Transaction, TransactionId, TransactionType};
pub use services::{summarize, TransactionStore, TransactionsView};
pub use utils::{StoreError, ValidationError};
