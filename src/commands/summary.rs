use crate::api::transactions::TransactionsApi;
use crate::commands::Session;
use crate::models::Summary;
use crate::utils::format::format_price;

pub fn execute<A: TransactionsApi>(session: &mut Session<A>) -> String {
    render(&session.summary())
}

/// The three summary cards, one per line, prices right-aligned
pub fn render(summary: &Summary) -> String {
    let cards = [
        ("Income", format_price(summary.income)),
        ("Outcome", format_price(summary.outcome)),
        ("Total", format_price(summary.total)),
    ];
    let width = cards
        .iter()
        .map(|(_, price)| price.chars().count())
        .max()
        .unwrap_or(0);

    cards
        .iter()
        .map(|(label, price)| format!("{:<7}  {:>width$}", label, price, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
