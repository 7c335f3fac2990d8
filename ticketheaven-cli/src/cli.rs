//! CLI argument definitions using clap
//!
//! Commands:
//! - ticketheaven list [--json]
//! - ticketheaven show --id <ID> [--json]
//! - ticketheaven create <member fields>
//! - ticketheaven update --id <ID> <member fields>
//! - ticketheaven delete --id <ID>
//! - ticketheaven init

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ticketheaven_shared::models::member::MemberInput;

/// TicketHeaven - member registry form
#[derive(Parser, Debug)]
#[command(name = "ticketheaven")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the database and member table if missing
    Init,

    #[command(flatten)]
    Form(FormCommand),
}

/// The actions of the member form
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// List every member
    List {
        /// Print members as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one member
    Show {
        /// Member id
        #[arg(long)]
        id: String,

        /// Print the member as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Register a new member
    Create {
        #[command(flatten)]
        member: MemberArgs,
    },

    /// Overwrite an existing member
    Update {
        /// Member id
        #[arg(long)]
        id: String,

        #[command(flatten)]
        member: MemberArgs,
    },

    /// Delete a member
    Delete {
        /// Member id
        #[arg(long)]
        id: String,
    },
}

/// The member fields of the form
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MemberArgs {
    /// Login name (3-20 characters)
    #[arg(long)]
    pub username: String,

    /// Display name (3-16 characters)
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Phone number (11 digits)
    #[arg(long)]
    pub phone: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long = "dob", value_name = "YYYY-MM-DD")]
    pub date_of_birth: NaiveDate,
}

impl From<MemberArgs> for MemberInput {
    fn from(args: MemberArgs) -> Self {
        MemberInput {
            username: args.username,
            name: args.name,
            email: args.email,
            phone_number: args.phone,
            date_of_birth: args.date_of_birth,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
