use rust_decimal::Decimal;
use thiserror::Error;

use crate::api::transactions::ApiError;

/// Input that fails the create constraints. Detected before any request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Price cannot be negative: {0}")]
    NegativePrice(Decimal),
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Unknown transaction type '{0}' (expected income or outcome)")]
    UnknownType(String),
}

/// Errors surfaced by the transaction store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Network failure: {0}")]
    Network(#[from] ApiError),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Errors from parsing or running a terminal command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type `help` to see the available commands.")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
