//! Form action dispatch
//!
//! `execute` never fails: every outcome, good or bad, becomes an [`Output`]
//! that is printed once. Only failures to reach the database at all are
//! left to the caller.

use std::io::{self, Write};

use ticketheaven_shared::error::{parse_member_id, MemberResult};
use ticketheaven_shared::models::member::{Member, MemberInput};
use ticketheaven_shared::service::MemberService;
use ticketheaven_shared::store::MemberStore;
use tracing::debug;

use crate::cli::FormCommand;
use crate::notice::Notice;
use crate::render::{render, Format};

/// What a form action shows the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Members { members: Vec<Member>, format: Format },
    Notice(Notice),
}

impl Output {
    pub fn is_error(&self) -> bool {
        matches!(self, Output::Notice(notice) if notice.is_error())
    }

    /// Writes listings and information notices to `out`, error notices to `err`
    pub fn write_to<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        match self {
            Output::Members { members, format } => {
                let text = render(members, *format)?;
                write!(out, "{}", text)?;
                if !text.ends_with('\n') {
                    writeln!(out)?;
                }
            }
            Output::Notice(notice) if notice.is_error() => writeln!(err, "{}", notice)?,
            Output::Notice(notice) => writeln!(out, "{}", notice)?,
        }
        Ok(())
    }
}

/// Runs one form action against the service
pub async fn execute<S: MemberStore>(service: &MemberService<S>, command: FormCommand) -> Output {
    debug!(?command, "Executing form action");

    match try_execute(service, command).await {
        Ok(output) => output,
        Err(err) => Output::Notice(Notice::from(&err)),
    }
}

async fn try_execute<S: MemberStore>(
    service: &MemberService<S>,
    command: FormCommand,
) -> MemberResult<Output> {
    match command {
        FormCommand::List { json } => Ok(Output::Members {
            members: service.list().await?,
            format: Format::from_json_flag(json),
        }),
        FormCommand::Show { id, json } => {
            let member = service.find(parse_member_id(&id)?).await?;
            Ok(Output::Members {
                members: vec![member],
                format: Format::from_json_flag(json),
            })
        }
        FormCommand::Create { member } => {
            service.create(&MemberInput::from(member)).await?;
            Ok(Output::Notice(Notice::created()))
        }
        FormCommand::Update { id, member } => {
            // Field errors are reported before a malformed id
            let input = MemberInput::from(member);
            service.validate(&input)?;
            service.update(parse_member_id(&id)?, &input).await?;
            Ok(Output::Notice(Notice::updated()))
        }
        FormCommand::Delete { id } => {
            service.delete(parse_member_id(&id)?).await?;
            Ok(Output::Notice(Notice::deleted()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_goes_to_stderr() {
        let output = Output::Notice(Notice::error("Error", "No record found with the given ID."));
        let mut out = Vec::new();
        let mut err = Vec::new();

        output.write_to(&mut out, &mut err).unwrap();

        assert!(output.is_error());
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "[Error]\nNo record found with the given ID.\n"
        );
    }

    #[test]
    fn test_success_notice_goes_to_stdout() {
        let output = Output::Notice(Notice::deleted());
        let mut out = Vec::new();
        let mut err = Vec::new();

        output.write_to(&mut out, &mut err).unwrap();

        assert!(!output.is_error());
        assert!(err.is_empty());
        assert!(String::from_utf8(out).unwrap().starts_with("[Success]"));
    }

    #[test]
    fn test_json_listing_ends_with_newline() {
        let output = Output::Members {
            members: Vec::new(),
            format: Format::Json,
        };
        let mut out = Vec::new();
        let mut err = Vec::new();

        output.write_to(&mut out, &mut err).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
