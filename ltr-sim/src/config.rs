//! Simulation parameters and roster file loading

use anyhow::{Context, Result};
use ltr_core::Roster;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Formatting and progression constants for a simulated race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Start stagger per grid slot
    pub slot_delay_ms: u64,

    /// Safety bound on simulated laps per competitor
    pub lap_count_cap: u32,

    /// Fixed remaining-time string used when no race duration is set
    pub race_duration_display: String,

    /// Total race length; when set the header counts down instead
    pub race_duration_ms: Option<u64>,

    /// Amplitude of the deterministic per-lap jitter (0 disables it)
    pub jitter_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            slot_delay_ms: 3_000,
            lap_count_cap: 20,
            race_duration_display: "30:00".to_string(),
            race_duration_ms: None,
            jitter_ms: 1_000,
        }
    }
}

/// On-disk roster description: `{ "simulation": {...}, "competitors": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub competitors: Roster,
}

impl RosterFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid roster file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse roster file {}", path.display()))
    }
}
