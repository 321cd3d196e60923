//! darlens command-line front end.
//!
//! This crate unpacks containers, hands their modules to the `darlens`
//! decoder and renders the resulting package models. It backs the `darlens`
//! binary and can be driven programmatically for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`commands`] - Subcommand implementations
//! - [`container`] - Container unpacking and manifest parsing
//! - [`error`] - CLI error types
//! - [`output`] - JSON rendering and diagnostics summaries

pub mod cli;
pub mod commands;
pub mod container;
pub mod error;
pub mod output;
