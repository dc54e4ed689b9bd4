//! Summary models

use rust_decimal::Decimal;
use serde::Serialize;

/// Running totals over a list of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: Decimal,
    pub outcome: Decimal,
    pub total: Decimal,
}
