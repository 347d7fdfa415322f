//! Integration tests for hivedash.
//!
//! These tests run against throwaway SQLite databases seeded with the
//! mirror schema, so they need no external services.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
