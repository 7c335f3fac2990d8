//! # TicketHeaven
//!
//! Command-line member registry form over a PostgreSQL `member` table.
//!
//! ## Usage
//!
//! ```bash
//! ticketheaven init
//! ticketheaven create --username abc --name John --email a@b.co --phone 12345678901 --dob 2004-06-01
//! ticketheaven list
//! ```

use std::process::ExitCode;

use ticketheaven_cli::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout only carries form output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketheaven_cli=warn,ticketheaven_shared=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("TicketHeaven v{} starting", env!("CARGO_PKG_VERSION"));

    ticketheaven_cli::run(Cli::parse_args()).await
}
