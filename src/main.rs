use std::path::PathBuf;
use std::process;

use account_forms::{
    parse_labels, run, AccountEdit, AccountId, AccountType, Command, Error, FileStorage,
    StoreConfig,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "account-forms")]
#[command(about = "Manage locally stored account forms", long_about = None)]
struct Cli {
    /// Directory holding accounts.json
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Quiet period before changes are written out, in milliseconds
    #[arg(long, default_value_t = 300)]
    debounce_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all accounts as CSV
    List,

    /// Add a blank local account and print its id
    Add,

    /// Edit fields of an existing account
    Update {
        id: AccountId,
        #[arg(long)]
        login: Option<String>,
        #[arg(long, conflicts_with = "clear_password")]
        password: Option<String>,
        #[arg(long)]
        clear_password: bool,
        /// Account type: local or ldap
        #[arg(long = "type")]
        account_type: Option<String>,
        /// Labels separated by ';'
        #[arg(long)]
        labels: Option<String>,
    },

    /// Remove an account
    Delete { id: AccountId },
}

impl TryFrom<Commands> for Command {
    type Error = Error;

    fn try_from(command: Commands) -> Result<Self, Self::Error> {
        Ok(match command {
            Commands::List => Command::List,
            Commands::Add => Command::Add,
            Commands::Update {
                id,
                login,
                password,
                clear_password,
                account_type,
                labels,
            } => Command::Update {
                id,
                edit: AccountEdit {
                    login,
                    password: if clear_password { Some(None) } else { password.map(Some) },
                    account_type: account_type
                        .as_deref()
                        .map(str::parse::<AccountType>)
                        .transpose()?,
                    labels: labels.as_deref().map(parse_labels),
                },
            },
            Commands::Delete { id } => Command::Delete { id },
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run_app().await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

async fn run_app() -> Result<(), Error> {
    let cli = Cli::parse();
    let command = Command::try_from(cli.command)?;
    let config = StoreConfig::with_debounce_ms(cli.debounce_ms);

    run(
        FileStorage::in_dir(&cli.data_dir),
        &config,
        command,
        std::io::stdout(),
    )
    .await
}
