//! Timing data model
//!
//! Defines the static competitor roster and the payload shapes served to
//! timing front-ends. The payload uses the provider's compact field letters:
//!
//! | Field            | Key |
//! |------------------|-----|
//! | header elapsed   | `e` |
//! | header remaining | `r` |
//! | competitor id    | `n` |
//! | display name     | `p` |
//! | completed laps   | `g` |
//! | last lap         | `j` |
//! | cumulative time  | `t` |
//! | rank             | `c` |
//! | gap to leader    | `d` |
//!
//! A full payload is the two-element array `[header, records]`.

use crate::error::RosterError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static parameters of one simulated competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorDef {
    /// Identifier shown by front-ends (usually the race number)
    pub id: String,

    pub display_name: String,

    /// Expected lap duration with no variation applied
    pub nominal_lap_ms: u64,

    /// 1-based grid position
    pub start_slot: u32,

    /// Signed per-lap offsets, cycled by lap index
    #[serde(default)]
    pub variation: Vec<i64>,
}

impl CompetitorDef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, nominal_lap_ms: u64, start_slot: u32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            nominal_lap_ms,
            start_slot,
            variation: Vec::new(),
        }
    }

    pub fn with_variation(mut self, variation: Vec<i64>) -> Self {
        self.variation = variation;
        self
    }

    /// Variation offset for a lap, or 0 when no sequence is configured
    pub fn variation_for_lap(&self, lap_index: u32) -> i64 {
        if self.variation.is_empty() {
            return 0;
        }
        self.variation[lap_index as usize % self.variation.len()]
    }
}

/// A validated, immutable list of competitors
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    competitors: Vec<CompetitorDef>,
}

impl Roster {
    /// Build a roster, rejecting empty or duplicate ids, zero lap times and
    /// zero start slots
    pub fn new(competitors: Vec<CompetitorDef>) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();

        for (index, competitor) in competitors.iter().enumerate() {
            if competitor.id.trim().is_empty() {
                return Err(RosterError::EmptyId { index });
            }
            if !seen.insert(competitor.id.as_str()) {
                return Err(RosterError::DuplicateId {
                    id: competitor.id.clone(),
                });
            }
            if competitor.nominal_lap_ms == 0 {
                return Err(RosterError::ZeroLapTime {
                    id: competitor.id.clone(),
                });
            }
            if competitor.start_slot == 0 {
                return Err(RosterError::ZeroStartSlot {
                    id: competitor.id.clone(),
                });
            }
        }

        Ok(Self { competitors })
    }

    pub fn competitors(&self) -> &[CompetitorDef] {
        &self.competitors
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompetitorDef> {
        self.competitors.iter()
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}

impl<'de> Deserialize<'de> for Roster {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let competitors = Vec::<CompetitorDef>::deserialize(deserializer)?;
        Roster::new(competitors).map_err(serde::de::Error::custom)
    }
}

/// Race-level header of a payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Elapsed race time, `M:SS`
    #[serde(rename = "e")]
    pub elapsed: String,

    /// Remaining race time
    #[serde(rename = "r")]
    pub remaining: String,
}

/// One competitor's line in the standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "n")]
    pub id: String,

    #[serde(rename = "p")]
    pub name: String,

    #[serde(rename = "g")]
    pub laps: String,

    #[serde(rename = "j")]
    pub last_lap: String,

    #[serde(rename = "t")]
    pub total_time: String,

    #[serde(rename = "c")]
    pub rank: String,

    /// Empty for the leader
    #[serde(rename = "d")]
    pub gap: String,
}

/// Complete payload, serialized as `[header, records]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings(pub Header, pub Vec<Record>);

impl Standings {
    pub fn header(&self) -> &Header {
        &self.0
    }

    pub fn records(&self) -> &[Record] {
        &self.1
    }
}

/// Acknowledgement returned when a session clock is reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAck {
    pub message: String,
    pub session: String,

    /// New start instant as Unix epoch milliseconds
    #[serde(rename = "startTime")]
    pub start_time: i64,
}

impl ResetAck {
    pub fn new(session: &str, start: DateTime<Utc>) -> Self {
        Self {
            message: "Timer reset".to_string(),
            session: session.to_string(),
            start_time: start.timestamp_millis(),
        }
    }
}
