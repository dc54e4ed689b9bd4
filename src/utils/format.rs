use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Transaction, TransactionType};

const CURRENCY_SYMBOL: &str = "R$";

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,56`
pub fn format_price(price: Decimal) -> String {
    let mut rounded = price
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if price.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}{} {},{}", sign, CURRENCY_SYMBOL, grouped, fraction)
}

/// Price as shown in the transaction table: outcomes carry a leading `- `
pub fn format_transaction_price(transaction: &Transaction) -> String {
    match transaction.kind {
        TransactionType::Income => format_price(transaction.price),
        TransactionType::Outcome => format!("- {}", format_price(transaction.price)),
    }
}

/// `dd/mm/yyyy` in whatever time zone `date` carries
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%d/%m/%Y").to_string()
}
