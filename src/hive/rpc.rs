//! Hive JSON-RPC client.
//!
//! Talks to a public Hive API node over the condenser API. Only the global
//! properties call is needed: it carries the vesting fund and share totals
//! from which the HIVE-per-MVEST factor is derived.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{HivedashError, Result};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default public API node.
const DEFAULT_RPC_URL: &str = "https://api.hive.blog";

/// Hive RPC client configuration.
#[derive(Debug, Clone)]
pub struct HiveRpcConfig {
    /// Base URL of the API node.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl HiveRpcConfig {
    /// Creates a config pointing at the given node.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for HiveRpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}

/// Hive JSON-RPC client.
#[derive(Debug, Clone)]
pub struct HiveRpcClient {
    config: HiveRpcConfig,
    client: Client,
}

impl HiveRpcClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: HiveRpcConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HivedashError::rpc(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Fetches the HIVE-per-MVEST conversion factor from the chain.
    pub async fn get_hive_per_mvest(&self) -> Result<f64> {
        let props = self.dynamic_global_properties().await?;
        hive_per_mvest_from(&props)
    }

    /// Calls `condenser_api.get_dynamic_global_properties`.
    pub async fn dynamic_global_properties(&self) -> Result<DynamicGlobalProperties> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "condenser_api.get_dynamic_global_properties",
            params: Vec::new(),
            id: 1,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HivedashError::rpc("Request to Hive API timed out. Try again.")
                } else if e.is_connect() {
                    HivedashError::rpc(format!(
                        "Failed to reach Hive API node at {}",
                        self.config.url
                    ))
                } else {
                    HivedashError::rpc(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HivedashError::rpc(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(HivedashError::rpc(format!(
                "Hive API error ({status}): {body}"
            )));
        }

        let envelope: RpcEnvelope = serde_json::from_str(&body)
            .map_err(|e| HivedashError::rpc(format!("Failed to parse response: {e}")))?;

        if let Some(err) = envelope.error {
            return Err(HivedashError::rpc(format!(
                "Hive API error ({}): {}",
                err.code, err.message
            )));
        }

        envelope
            .result
            .ok_or_else(|| HivedashError::rpc("Response carried neither result nor error"))
    }
}

/// Derives HIVE per million vesting shares from the global properties.
pub fn hive_per_mvest_from(props: &DynamicGlobalProperties) -> Result<f64> {
    let fund = parse_asset(&props.total_vesting_fund_hive)?;
    let shares = parse_asset(&props.total_vesting_shares)?;

    if shares <= 0.0 {
        return Err(HivedashError::rpc(format!(
            "Total vesting shares is not positive: {shares}"
        )));
    }

    Ok(fund / shares * 1_000_000.0)
}

/// Parses the numeric half of an asset string like `"178441.873 HIVE"`.
fn parse_asset(asset: &str) -> Result<f64> {
    let amount = asset
        .split_whitespace()
        .next()
        .ok_or_else(|| HivedashError::rpc(format!("Empty asset string: {asset:?}")))?;

    amount
        .parse::<f64>()
        .map_err(|_| HivedashError::rpc(format!("Malformed asset string: {asset:?}")))
}

// Condenser API types

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'a str,
    method: &'a str,
    params: Vec<String>,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<DynamicGlobalProperties>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// The subset of `get_dynamic_global_properties` the dashboard uses.
#[derive(Debug, Clone, Deserialize)]
pub struct DynamicGlobalProperties {
    pub total_vesting_fund_hive: String,
    pub total_vesting_shares: String,
}
