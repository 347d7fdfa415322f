//! hivedash - A terminal dashboard for Hive blockchain data.
//!
//! This library exposes the application modules for use by the binary
//! and the integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod hive;
pub mod logging;
pub mod pages;
pub mod query;
pub mod tui;
