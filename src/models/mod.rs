//! Data models shared by the store, the aggregator and the terminal front end
//!
//! Each model mirrors either a record the backend sends or a value derived
//! from the local transaction list.

pub mod summary;
pub mod transaction;

pub use summary::Summary;
pub use transaction::{parse_price, NewTransaction, Transaction, TransactionId, TransactionType};
