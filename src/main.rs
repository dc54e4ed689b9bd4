use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use cashflow_tracker::commands::{self, Command, Reply, Session};
use cashflow_tracker::{Config, TransactionStore, TransactionsClient};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cashflow_tracker=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("💸 Starting cashflow tracker...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let client = match TransactionsClient::with_timeout(config.api_url, config.request_timeout) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create API client: {}", e);
            return;
        }
    };
    info!("Using transactions backend at {}", client.base_url());

    let mut session = Session::new(TransactionStore::new(client));

    // Initial load; a failure is reported and the session stays usable
    match commands::execute(&mut session, Command::List).await {
        Ok(Reply::Print(output)) => println!("{}\n", output),
        Ok(Reply::Quit) => return,
        Err(e) => {
            warn!("Initial fetch failed: {}", e);
            println!("⚠️ Could not load transactions: {}. Type `list` to retry.\n", e);
        }
    }
    println!("Type `help` to see the available commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        if let Err(e) = std::io::stdout().flush() {
            debug!("Failed to flush prompt: {}", e);
        }

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        match commands::handle_line(&mut session, &line).await {
            Some(Reply::Print(output)) => println!("{}\n", output),
            Some(Reply::Quit) => break,
            None => {}
        }
    }

    info!("Bye 👋");
}
