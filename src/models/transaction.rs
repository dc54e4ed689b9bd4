//! Transaction models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::errors::ValidationError;

/// Server-assigned identifier. The backend may hand out numbers or strings,
/// so both are accepted and sent back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionId::Number(id) => write!(f, "{}", id),
            TransactionId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Whether a transaction adds to or subtracts from the running total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Outcome,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(TransactionType::Income),
            "outcome" | "out" => Ok(TransactionType::Outcome),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A single income or outcome record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// User input for a new transaction, before the backend has assigned an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub kind: TransactionType,
}

impl NewTransaction {
    pub fn new(
        description: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            description: description.into(),
            price,
            category: category.into(),
            kind,
        }
    }

    /// Check the input before anything is sent to the backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ValidationError::NegativePrice(self.price));
        }
        Ok(())
    }
}

/// Parse a user-typed price. Both `.` and `,` are accepted as the decimal
/// separator; thousands separators are not.
pub fn parse_price(input: &str) -> Result<Decimal, ValidationError> {
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ValidationError::InvalidPrice(input.to_string()))
}
