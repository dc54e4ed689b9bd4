use crate::models::{Summary, Transaction, TransactionType};

/// Fold a transaction list into income, outcome and net total.
///
/// Every entry counts; an empty list gives an all-zero summary.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    transactions
        .iter()
        .fold(Summary::default(), |mut acc, transaction| {
            match transaction.kind {
                TransactionType::Income => {
                    acc.income += transaction.price;
                    acc.total += transaction.price;
                }
                TransactionType::Outcome => {
                    acc.outcome += transaction.price;
                    acc.total -= transaction.price;
                }
            }
            acc
        })
}
