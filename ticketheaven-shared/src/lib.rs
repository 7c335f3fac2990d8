//! # TicketHeaven Shared Library
//!
//! This crate contains the member registry used by the TicketHeaven
//! command-line form: the data model, field validation, the record gateway
//! and the service that ties one user action together.
//!
//! ## Module Organization
//!
//! - `models`: Member row and form input types
//! - `validation`: Client-side field rules
//! - `store`: `MemberStore` trait with Postgres and in-memory backends
//! - `service`: Validate → duplicate check → write, per user action
//! - `config`: Connection settings from the environment
//! - `db`: Connection handle and schema bootstrap
//! - `error`: Common error types

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

/// Current version of the TicketHeaven shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
