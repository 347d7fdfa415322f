//! Query execution for hivedash.
//!
//! This module isolates the open-query-close cycle and its three-way
//! outcome from the UI layer.

pub mod executor;

pub use executor::{QueryExecutor, QueryFailure, QueryOutcome};
