//! Simulated race timing source
//!
//! Serves a live-looking race without an upstream. Each session has its own
//! race clock; standings are recomputed from elapsed time on every request.

use crate::config::{RosterFile, SimulationConfig};
use crate::roster::default_roster;
use crate::standings::{compose, rank, RaceState};
use anyhow::Result;
use chrono::{DateTime, Utc};
use ltr_core::{ResetAck, Roster, SessionRegistry, Standings, TimingSource};
use std::path::Path;
use tracing::{debug, info};

pub struct RaceSimulator {
    roster: Roster,
    config: SimulationConfig,
    sessions: SessionRegistry,
}

impl RaceSimulator {
    pub fn new(roster: Roster, config: SimulationConfig) -> Self {
        Self {
            roster,
            config,
            sessions: SessionRegistry::new(),
        }
    }

    /// Load roster and simulation parameters from a JSON roster file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = RosterFile::from_file(path)?;
        info!(
            "Loaded roster with {} competitors from {}",
            file.competitors.len(),
            path.display()
        );
        Ok(Self::new(file.competitors, file.simulation))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Standings at a given race time, independent of any session
    pub fn standings_at(&self, elapsed_ms: u64) -> Standings {
        compose(&self.roster, elapsed_ms, &self.config)
    }

    /// Ranked competitor states at a given race time
    pub fn race_states_at(&self, elapsed_ms: u64) -> Vec<RaceState<'_>> {
        rank(&self.roster, elapsed_ms, &self.config)
    }

    /// Standings for `session` as of `now`
    pub fn live(&self, session: &str, now: DateTime<Utc>) -> Standings {
        let elapsed_ms = self.sessions.elapsed_since(session, now);
        debug!(session, elapsed_ms, "Simulating standings");
        self.standings_at(elapsed_ms)
    }
}

impl Default for RaceSimulator {
    fn default() -> Self {
        Self::new(default_roster(), SimulationConfig::default())
    }
}

impl TimingSource for RaceSimulator {
    fn name(&self) -> &str {
        "Simulator"
    }

    fn snapshot(&self, session: &str, now: DateTime<Utc>) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.live(session, now))?)
    }

    fn reset(&self, session: &str, now: DateTime<Utc>) -> ResetAck {
        let start = self.sessions.reset(session, now);
        info!(session, "Simulated race clock reset");
        ResetAck::new(session, start)
    }
}
