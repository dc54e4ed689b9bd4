use crate::api::transactions::TransactionsApi;
use crate::commands::{list, summary, Session};
use crate::models::NewTransaction;
use crate::utils::errors::CommandError;

/// Create a transaction and print it along with the updated summary
pub async fn execute<A: TransactionsApi>(
    session: &mut Session<A>,
    input: NewTransaction,
) -> Result<String, CommandError> {
    let created = session.store().create_transaction(input).await?;

    Ok(format!(
        "✅ Transaction created\n\n{}\n\n{}",
        list::render_transactions(std::slice::from_ref(&created)),
        summary::render(&session.summary())
    ))
}
