//! Driver candidate resolution.
//!
//! The mirror endpoint speaks different TLS dialects depending on how the
//! hoster configured it, so we keep an ordered list of candidate connection
//! URLs and probe them at startup. The first candidate that opens wins and
//! its URL is reused for every query for the rest of the process lifetime.

use crate::db;
use crate::error::Result;
use std::future::Future;
use tracing::{error, info, warn};

/// One entry in the ordered candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverCandidate {
    /// Human-readable name for logs.
    pub name: String,

    /// Full connection URL including credentials.
    pub url: String,
}

impl DriverCandidate {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The winning candidate, kept for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnection {
    /// Name of the candidate that connected.
    pub driver: String,

    /// Connection URL to reuse for every query.
    pub url: String,
}

/// Probes candidates in order and returns the first one that connects.
///
/// Each probe opens a connection and immediately closes it. Candidates after
/// the first success are never attempted. Returns `None` when every candidate
/// fails; queries then report the missing connection instead of retrying.
pub async fn resolve_connection(candidates: &[DriverCandidate]) -> Option<ResolvedConnection> {
    resolve_with(candidates, probe).await
}

/// Opens and immediately closes a connection to check the URL works.
async fn probe(url: String) -> Result<()> {
    let conn = db::open(&url).await?;
    conn.close().await
}

/// Resolution loop with the probe injected, so tests can count attempts.
async fn resolve_with<F, Fut>(
    candidates: &[DriverCandidate],
    mut probe_fn: F,
) -> Option<ResolvedConnection>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for candidate in candidates {
        match probe_fn(candidate.url.clone()).await {
            Ok(()) => {
                info!("Connected successfully using {}", candidate.name);
                return Some(ResolvedConnection {
                    driver: candidate.name.clone(),
                    url: candidate.url.clone(),
                });
            }
            Err(e) => {
                warn!("Candidate {} failed: {e}", candidate.name);
            }
        }
    }

    error!("No working database driver found.");
    None
}
