//! Timing source trait definition

use crate::model::ResetAck;
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Trait for local sources of timing payloads
///
/// A source stands in for the upstream provider when no live race is
/// available. Each source keeps its own per-session clocks and must produce
/// payloads in the provider's wire format.
pub trait TimingSource: Send + Sync {
    /// Get the name of this source (e.g., "Simulator", "Snapshot")
    fn name(&self) -> &str;

    /// Produce the payload for `session` as of `now`
    ///
    /// The first reference to a session starts its clock at `now`.
    fn snapshot(&self, session: &str, now: DateTime<Utc>) -> Result<serde_json::Value>;

    /// Restart the clock for `session` at `now`
    fn reset(&self, session: &str, now: DateTime<Utc>) -> ResetAck;
}
