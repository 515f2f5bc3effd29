mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use trendtap_db_entities::SecurityEvent::{SecurityEventKind, Severity};
use uuid::Uuid;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "/etc/trendtap.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate config file
    Check,
    /// Create a password hash for use in the config file
    Hash,
    /// Generate a random password
    GeneratePassword {
        #[clap(long, short, default_value_t = 16)]
        length: usize,
        /// Use only letters and digits
        #[clap(long)]
        no_special: bool,
    },
    /// Evaluate the strength of a password read from the terminal
    CheckPassword {
        /// Penalize passwords derived from this e-mail address
        #[clap(long)]
        email: Option<String>,
        #[clap(long)]
        first_name: Option<String>,
        #[clap(long)]
        last_name: Option<String>,
        #[clap(long)]
        json: bool,
    },
    /// Lock an account
    Lock {
        user_id: Uuid,
        #[clap(long, default_value = "Locked by administrator")]
        reason: String,
        /// Lockout duration, e.g. "30m" or "2h" (default taken from the config)
        #[clap(long, value_parser = humantime::parse_duration)]
        duration: Option<Duration>,
        /// Keep the account locked until explicitly unlocked
        #[clap(long)]
        permanent: bool,
        /// Id of the administrator issuing the lock
        #[clap(long)]
        locked_by: Option<Uuid>,
    },
    /// Unlock an account by user id or by unlock token
    Unlock {
        user_id: Option<Uuid>,
        #[clap(long, conflicts_with = "user_id")]
        token: Option<String>,
        #[clap(long, default_value = "Unlocked by administrator")]
        reason: String,
    },
    /// Show the security posture of an account
    Status {
        user_id: Uuid,
        #[clap(long)]
        json: bool,
    },
    /// List recorded security events
    Events {
        #[clap(long)]
        user_id: Option<Uuid>,
        #[clap(long)]
        kind: Option<SecurityEventKind>,
        #[clap(long)]
        severity: Option<Severity>,
        #[clap(long, default_value_t = 25)]
        limit: u64,
        #[clap(long)]
        json: bool,
    },
    /// Close expired lockouts and drop stale failed login attempts
    Cleanup,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Check => crate::commands::check::command(&cli).await,
        Commands::Hash => crate::commands::hash::command().await,
        Commands::GeneratePassword { length, no_special } => {
            crate::commands::generate_password::command(*length, *no_special).await
        }
        Commands::CheckPassword {
            email,
            first_name,
            last_name,
            json,
        } => {
            crate::commands::check_password::command(
                &cli,
                email.as_deref(),
                first_name.as_deref(),
                last_name.as_deref(),
                *json,
            )
            .await
        }
        Commands::Lock {
            user_id,
            reason,
            duration,
            permanent,
            locked_by,
        } => {
            crate::commands::lock::command(&cli, *user_id, reason, *duration, *permanent, *locked_by)
                .await
        }
        Commands::Unlock {
            user_id,
            token,
            reason,
        } => crate::commands::unlock::command(&cli, *user_id, token.as_deref(), reason).await,
        Commands::Status { user_id, json } => {
            crate::commands::status::command(&cli, *user_id, *json).await
        }
        Commands::Events {
            user_id,
            kind,
            severity,
            limit,
            json,
        } => {
            crate::commands::events::command(
                &cli,
                *user_id,
                kind.clone(),
                severity.clone(),
                *limit,
                *json,
            )
            .await
        }
        Commands::Cleanup => crate::commands::cleanup::command(&cli).await,
    }
}
