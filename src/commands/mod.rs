pub mod help;
pub mod list;
pub mod new;
pub mod summary;

use tracing::{debug, warn};

use crate::api::transactions::{ApiError, TransactionsApi};
use crate::models::{parse_price, NewTransaction, Summary, TransactionType};
use crate::services::transaction_store::{TransactionStore, TransactionsView};
use crate::utils::errors::{CommandError, StoreError};

const SEARCH_USAGE: &str = "search <text...>";
const NEW_USAGE: &str = "new <income|outcome> <price> <category> <description...>";

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Search(String),
    New(NewTransaction),
    Summary,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(None);
        };

        let command = match command.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" | "s" => {
                if args.is_empty() {
                    return Err(CommandError::Usage(SEARCH_USAGE));
                }
                Command::Search(args.join(" "))
            }
            "new" | "add" => Command::New(parse_new(args)?),
            "summary" | "sum" => Command::Summary,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_new(args: &[&str]) -> Result<NewTransaction, CommandError> {
    let [kind, price, category, description @ ..] = args else {
        return Err(CommandError::Usage(NEW_USAGE));
    };
    if description.is_empty() {
        return Err(CommandError::Usage(NEW_USAGE));
    }

    let kind: TransactionType = kind.parse()?;
    let price = parse_price(price)?;
    Ok(NewTransaction::new(description.join(" "), price, *category, kind))
}

/// What the front end should do after a command
#[derive(Debug, PartialEq)]
pub enum Reply {
    Print(String),
    Quit,
}

/// The store plus the view the front end reads the summary from
pub struct Session<A> {
    store: TransactionStore<A>,
    view: TransactionsView,
}

impl<A: TransactionsApi> Session<A> {
    pub fn new(store: TransactionStore<A>) -> Self {
        let view = store.subscribe();
        Self { store, view }
    }

    pub fn store(&self) -> &TransactionStore<A> {
        &self.store
    }

    pub fn summary(&mut self) -> Summary {
        self.view.summary()
    }
}

pub async fn execute<A: TransactionsApi>(
    session: &mut Session<A>,
    command: Command,
) -> Result<Reply, CommandError> {
    let output = match command {
        Command::List => list::execute(session, None).await?,
        Command::Search(query) => list::execute(session, Some(&query)).await?,
        Command::New(input) => new::execute(session, input).await?,
        Command::Summary => summary::execute(session),
        Command::Help => help::execute(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Print(output))
}

/// Parse and run one input line. Errors come back as printable messages;
/// blank lines produce no reply.
pub async fn handle_line<A: TransactionsApi>(session: &mut Session<A>, line: &str) -> Option<Reply> {
    let command = match Command::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => return None,
        Err(e) => return Some(Reply::Print(user_message(&e))),
    };

    debug!("Running command {:?}", command);
    match execute(session, command).await {
        Ok(reply) => Some(reply),
        Err(e) => {
            warn!("Command failed: {}", e);
            Some(Reply::Print(user_message(&e)))
        }
    }
}

fn user_message(error: &CommandError) -> String {
    match error {
        CommandError::Store(StoreError::Network(ApiError::RequestError(_))) => {
            "⚠️ Network Error: could not reach the transactions backend. Please try again.".to_string()
        }
        CommandError::Store(StoreError::Network(ApiError::ServerError(status, _))) => {
            format!("⚠️ Server Error ({}): the backend failed to answer. Please try again.", status)
        }
        other => format!("❌ {}", other),
    }
}
