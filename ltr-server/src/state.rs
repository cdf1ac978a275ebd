//! Application state management

use crate::config::ServerConfig;
use crate::upstream::UpstreamClient;
use anyhow::Result;
use ltr_core::TimingSource;
use ltr_sim::{RaceSimulator, SnapshotPlayer};
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Simulated race served by `/test/live` and the demo access code
    pub simulator: Arc<RaceSimulator>,

    /// Pre-captured playback served by `/test` and the snapshot access code
    pub snapshots: Arc<SnapshotPlayer>,

    pub upstream: Arc<UpstreamClient>,

    demo_code: String,
    snapshot_code: String,
}

impl AppState {
    /// Build state from configuration, loading roster and recording files
    /// when they are configured
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let simulator = match &config.roster_path {
            Some(path) => RaceSimulator::from_file(path)?,
            None => {
                info!("Using built-in demo roster");
                RaceSimulator::default()
            }
        };

        let snapshots = match &config.snapshot_path {
            Some(path) => SnapshotPlayer::from_file(path)?,
            None => {
                info!("Using built-in snapshot capture");
                SnapshotPlayer::builtin()
            }
        };

        Self::with_sources(config, simulator, snapshots)
    }

    pub fn with_sources(config: &ServerConfig, simulator: RaceSimulator, snapshots: SnapshotPlayer) -> Result<Self> {
        let upstream = UpstreamClient::new(config.upstream_host.clone(), config.upstream_timeout)?;

        Ok(Self {
            simulator: Arc::new(simulator),
            snapshots: Arc::new(snapshots),
            upstream: Arc::new(upstream),
            demo_code: config.demo_code.clone(),
            snapshot_code: config.snapshot_code.clone(),
        })
    }

    /// Local source selected by a proxy access code, if any
    pub fn source_for_code(&self, code: &str) -> Option<&dyn TimingSource> {
        let code = code.trim();
        if code.eq_ignore_ascii_case(&self.demo_code) {
            Some(self.simulator.as_ref())
        } else if code.eq_ignore_ascii_case(&self.snapshot_code) {
            Some(self.snapshots.as_ref())
        } else {
            None
        }
    }
}
