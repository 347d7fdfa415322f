//! Integration tests for hivedash.
//!
//! Each test seeds its own throwaway SQLite database with the mirror
//! schema and drives the public query path against it.

pub mod common;
pub mod executor_test;
pub mod pages_test;
pub mod resolver_test;
