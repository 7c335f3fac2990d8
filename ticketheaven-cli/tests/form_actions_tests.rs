//! End-to-end form actions over the in-memory store
//!
//! Arguments are parsed exactly as the binary parses them, then dispatched
//! through `execute`. No database is needed.

use chrono::{Datelike, NaiveDate};
use clap::Parser;
use ticketheaven_cli::cli::{Cli, Command, FormCommand};
use ticketheaven_cli::commands::{execute, Output};
use ticketheaven_cli::render::Format;
use ticketheaven_shared::service::MemberService;
use ticketheaven_shared::store::InMemoryMemberStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
}

fn service() -> MemberService<InMemoryMemberStore> {
    MemberService::new(InMemoryMemberStore::new()).with_today(today())
}

fn form(args: &[&str]) -> FormCommand {
    let cli = Cli::try_parse_from(std::iter::once("ticketheaven").chain(args.iter().copied()))
        .expect("arguments should parse");
    match cli.command {
        Command::Form(command) => command,
        other => panic!("Expected a form action, got {:?}", other),
    }
}

fn dob(years: i32) -> String {
    let t = today();
    format!("{:04}-{:02}-{:02}", t.year() - years, t.month(), t.day())
}

fn create_args<'a>(username: &'a str, email: &'a str, phone: &'a str, dob: &'a str) -> Vec<&'a str> {
    vec![
        "create",
        "--username",
        username,
        "--name",
        "John",
        "--email",
        email,
        "--phone",
        phone,
        "--dob",
        dob,
    ]
}

fn notice_of(output: &Output) -> (&'static str, String, bool) {
    match output {
        Output::Notice(notice) => (notice.title, notice.message.clone(), notice.is_error()),
        other => panic!("Expected a notice, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_list() {
    let service = service();
    let born = dob(20);

    let output = execute(&service, form(&create_args("abc", "a@b.co", "12345678901", &born))).await;
    let (title, message, is_error) = notice_of(&output);
    assert_eq!(title, "Success");
    assert_eq!(message, "User insertion has been done successfully.");
    assert!(!is_error);

    match execute(&service, form(&["list"])).await {
        Output::Members { members, format } => {
            assert_eq!(format, Format::Table);
            assert_eq!(members.len(), 1);
            assert_eq!(members[0].username, "abc");
        }
        other => panic!("Expected members, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_email_notice() {
    let service = service();
    let born = dob(25);

    execute(&service, form(&create_args("abc", "a@b.co", "12345678901", &born))).await;
    let output = execute(&service, form(&create_args("xyz", "a@b.co", "10987654321", &born))).await;

    let (title, message, is_error) = notice_of(&output);
    assert_eq!(title, "Duplicate Entry");
    assert_eq!(
        message,
        "Username, email, or phone number already exists. Please use unique values."
    );
    assert!(is_error);
    assert!(output.is_error());
}

#[tokio::test]
async fn test_validation_notice_joins_messages() {
    let service = service();
    let born = dob(12);

    let output = execute(&service, form(&create_args("ab", "a@b.co", "123", &born))).await;
    let (title, message, _) = notice_of(&output);

    assert_eq!(title, "Validation Errors");
    assert_eq!(
        message,
        "Username must be between 3 and 20 characters.\n\
         Phone number must be exactly 11 numeric digits.\n\
         Age must be between 18 and 100 years."
    );
}

#[tokio::test]
async fn test_update_and_delete_flow() {
    let service = service();
    let born = dob(40);

    execute(&service, form(&create_args("abc", "a@b.co", "12345678901", &born))).await;

    let output = execute(
        &service,
        form(&[
            "update", "--id", "1", "--username", "abcd", "--name", "Johnny", "--email", "a@b.co",
            "--phone", "12345678901", "--dob", born.as_str(),
        ]),
    )
    .await;
    assert_eq!(notice_of(&output).1, "User has been updated successfully.");

    match execute(&service, form(&["show", "--id", "1", "--json"])).await {
        Output::Members { members, format } => {
            assert_eq!(format, Format::Json);
            assert_eq!(members[0].name, "Johnny");
        }
        other => panic!("Expected members, got {:?}", other),
    }

    let output = execute(&service, form(&["delete", "--id", "1"])).await;
    assert_eq!(notice_of(&output).1, "Record has been deleted successfully.");

    let output = execute(&service, form(&["delete", "--id", "1"])).await;
    let (title, message, is_error) = notice_of(&output);
    assert_eq!(title, "Error");
    assert_eq!(message, "No record found with the given ID.");
    assert!(is_error);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let service = service();
    let born = dob(30);

    let output = execute(
        &service,
        form(&[
            "update", "--id", "77", "--username", "abc", "--name", "John", "--email", "a@b.co",
            "--phone", "12345678901", "--dob", born.as_str(),
        ]),
    )
    .await;

    assert_eq!(notice_of(&output).1, "No record found with the given ID.");
}

#[tokio::test]
async fn test_non_numeric_id_is_reported() {
    let service = service();

    let output = execute(&service, form(&["delete", "--id", "seven"])).await;
    let (title, message, is_error) = notice_of(&output);

    assert_eq!(title, "Error");
    assert!(message.contains("\"seven\""));
    assert!(is_error);
}

#[tokio::test]
async fn test_update_reports_field_errors_before_bad_id() {
    let service = service();

    let output = execute(
        &service,
        form(&[
            "update", "--id", "abc", "--username", "x", "--name", "y", "--email", "bad",
            "--phone", "1", "--dob", "2020-01-01",
        ]),
    )
    .await;
    let (title, message, is_error) = notice_of(&output);

    assert_eq!(title, "Validation Errors");
    assert_eq!(message.lines().count(), 5);
    assert!(is_error);
}

#[tokio::test]
async fn test_update_with_valid_fields_and_bad_id() {
    let service = service();
    let born = dob(30);

    execute(&service, form(&create_args("abc", "a@b.co", "12345678901", &born))).await;

    let output = execute(
        &service,
        form(&[
            "update", "--id", "one", "--username", "abcd", "--name", "John", "--email", "a@b.co",
            "--phone", "12345678901", "--dob", born.as_str(),
        ]),
    )
    .await;
    let (title, message, is_error) = notice_of(&output);

    assert_eq!(title, "Error");
    assert_eq!(message, "The ID must be a whole number, got \"one\".");
    assert!(is_error);

    match execute(&service, form(&["show", "--id", "1"])).await {
        Output::Members { members, .. } => assert_eq!(members[0].username, "abc"),
        other => panic!("Expected members, got {:?}", other),
    }
}

#[tokio::test]
async fn test_show_non_numeric_id_is_reported() {
    let service = service();

    let output = execute(&service, form(&["show", "--id", "1.5"])).await;
    let (title, message, is_error) = notice_of(&output);

    assert_eq!(title, "Error");
    assert!(message.contains("\"1.5\""));
    assert!(is_error);
}
