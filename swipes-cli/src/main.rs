//! Swipes CLI - campus card balances in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{accounts, institutions, login, logout, profile, status, transactions};

/// Swipes - campus card balances and transactions in your terminal
#[derive(Parser)]
#[command(name = "swipes", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in through your institution's web login
    Login {
        /// Institution short name, name, or id (prompts if omitted)
        #[arg(long, short, env = "SWIPES_INSTITUTION")]
        institution: Option<String>,
        /// Redirect URL from the browser (skips the prompts)
        #[arg(long)]
        url: Option<String>,
        /// Open the login page in the default browser
        #[arg(long)]
        open: bool,
    },

    /// Forget the stored session
    Logout,

    /// Show session state and a balance overview
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List institutions available for login
    Institutions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List accounts and balances
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recent transactions
    Transactions {
        /// Maximum number of transactions to return
        #[arg(long, short)]
        max: Option<u32>,
        /// Only transactions for this account id
        #[arg(long)]
        account_id: Option<String>,
        /// Oldest date to include (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Newest date to include (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        /// Payment system type filter (0 = all)
        #[arg(long)]
        payment_system_type: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the logged-in user's profile
    Profile {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `SWIPES_LOG` (default: warnings only)
fn init_logging() {
    let filter = EnvFilter::try_from_env("SWIPES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { institution, url, open } => login::run(institution, url, open).await,
        Commands::Logout => logout::run().await,
        Commands::Status { json } => status::run(json).await,
        Commands::Institutions { json } => institutions::run(json).await,
        Commands::Accounts { json } => accounts::run(json).await,
        Commands::Transactions { max, account_id, since, until, payment_system_type, json } => {
            transactions::run(
                transactions::Filter { max, account_id, since, until, payment_system_type },
                json,
            )
            .await
        }
        Commands::Profile { json } => profile::run(json).await,
    }
}
