use chrono::Local;

use crate::api::transactions::TransactionsApi;
use crate::commands::{summary, Session};
use crate::models::Transaction;
use crate::utils::errors::CommandError;
use crate::utils::format::{format_date, format_transaction_price};
use crate::utils::Table;

/// Refetch the list (optionally filtered) and print the summary and table
pub async fn execute<A: TransactionsApi>(
    session: &mut Session<A>,
    query: Option<&str>,
) -> Result<String, CommandError> {
    session.store().fetch_transactions(query).await?;

    let transactions = session.store().transactions();
    let summary = summary::render(&session.summary());
    let table = render_transactions(&transactions);

    Ok(match query {
        Some(query) => format!(
            "{}\n\n🔎 {} result(s) for '{}'\n{}",
            summary,
            transactions.len(),
            query,
            table
        ),
        None => format!("{}\n\n{}", summary, table),
    })
}

/// Render transactions newest first as a table of description, price,
/// category and date
pub fn render_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "📋 No transactions found".to_string();
    }

    let mut table = Table::new(vec!["Description", "Price", "Category", "Date"]).align_right(1);
    for transaction in transactions {
        table.add_row(vec![
            transaction.description.clone(),
            format_transaction_price(transaction),
            transaction.category.clone(),
            format_date(&transaction.created_at.with_timezone(&Local)),
        ]);
    }
    table.render()
}
