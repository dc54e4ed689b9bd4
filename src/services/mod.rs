pub mod summary_service;
pub mod transaction_store;

pub use summary_service::summarize;
pub use transaction_store::{TransactionStore, TransactionsView};
