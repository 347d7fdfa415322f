//! Hive blockchain API access.
//!
//! The mirror database stores raw vesting shares; turning those into Hive
//! Power needs the chain-wide conversion factor, which only the live Hive
//! API knows. This module fetches and derives that factor.

pub mod rpc;

pub use rpc::{HiveRpcClient, HiveRpcConfig};

/// Converts raw vesting shares to Hive Power using the chain factor.
///
/// `hive_per_mvest` is HIVE per million vesting shares, so the shares are
/// scaled down by 1e6 before applying it.
pub fn vests_to_hp(vests: f64, hive_per_mvest: f64) -> f64 {
    vests * hive_per_mvest / 1_000_000.0
}
