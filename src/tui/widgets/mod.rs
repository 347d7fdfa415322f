//! TUI widgets for hivedash.
//!
//! Contains reusable UI components.

pub mod chart;
pub mod header;
pub mod spinner;
