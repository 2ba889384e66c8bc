// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # katello-filter
//!
//! Command line client for content view definition filters on a Katello
//! server. Filters are created, listed, inspected and deleted; products and
//! repositories are attached or detached; and inclusion or exclusion rules are
//! added or removed per content type.
//!
//! All state lives on the server. This crate parses and validates options,
//! resolves names and labels to ids, issues the REST call and prints the
//! result.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod resolve;
pub mod rules;

pub use error::{FilterError, Result};

/// Version information for the client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
