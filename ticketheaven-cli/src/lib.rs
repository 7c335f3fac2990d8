//! # TicketHeaven CLI Library
//!
//! The command-line member form: one invocation is one form action.
//!
//! ## Modules
//!
//! - `cli`: Argument definitions
//! - `commands`: Form action dispatch
//! - `notice`: Titled result messages
//! - `render`: Member listing output

pub mod cli;
pub mod commands;
pub mod notice;
pub mod render;

use std::io;
use std::process::ExitCode;

use ticketheaven_shared::config::DatabaseSettings;
use ticketheaven_shared::db::pool::{close_pool, connect, DatabaseConfig};
use ticketheaven_shared::db::schema::{ensure_database_exists, ensure_member_table};
use ticketheaven_shared::service::MemberService;
use ticketheaven_shared::store::PgMemberGateway;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::commands::{execute, Output};
use crate::notice::Notice;

/// Runs the parsed command against the configured database
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the database cannot be
/// reached, or output cannot be written. Everything else is reported as a
/// notice and reflected in the exit code.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = DatabaseSettings::from_env()?;
    info!(database = %settings.describe(), "Using database");

    let output = match cli.command {
        Command::Init => init(&settings).await?,
        Command::Form(command) => {
            let pool = connect(DatabaseConfig::from_settings(&settings)?).await?;
            let service = MemberService::new(PgMemberGateway::new(pool.clone()));

            let output = execute(&service, command).await;
            close_pool(pool).await;
            output
        }
    };

    output.write_to(&mut io::stdout().lock(), &mut io::stderr().lock())?;

    Ok(if output.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn init(settings: &DatabaseSettings) -> anyhow::Result<Output> {
    ensure_database_exists(&settings.connection_url()?).await?;

    let pool = connect(DatabaseConfig::from_settings(settings)?).await?;
    ensure_member_table(&pool).await?;
    close_pool(pool).await;

    Ok(Output::Notice(Notice::info("Success", "Member table is ready.")))
}
