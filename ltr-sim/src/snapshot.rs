//! Snapshot playback of pre-captured timing payloads
//!
//! A recording is a list of payloads captured from the provider. Each session
//! plays it back from its own start instant, advancing one frame every
//! `interval_ms`. Playback either holds the last frame or wraps around.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use ltr_core::format::{format_clock, format_gap, format_lap_gap, format_lap_time};
use ltr_core::{Header, Record, ResetAck, SessionRegistry, Standings, TimingSource};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_INTERVAL_MS: u64 = 5_000;

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordingFile {
    Framed {
        #[serde(default = "default_interval_ms")]
        interval_ms: u64,
        #[serde(default, rename = "loop")]
        looped: bool,
        frames: Vec<serde_json::Value>,
    },
    Bare(Vec<serde_json::Value>),
}

/// Plays a recording back per session
pub struct SnapshotPlayer {
    frames: Vec<serde_json::Value>,
    interval_ms: u64,
    looped: bool,
    sessions: SessionRegistry,
}

impl SnapshotPlayer {
    pub fn new(frames: Vec<serde_json::Value>, interval_ms: u64, looped: bool) -> Result<Self> {
        if frames.is_empty() {
            bail!("Recording contains no frames");
        }
        if interval_ms == 0 {
            bail!("Frame interval must be positive");
        }

        Ok(Self {
            frames,
            interval_ms,
            looped,
            sessions: SessionRegistry::new(),
        })
    }

    /// Parse a recording: either `{"interval_ms", "loop", "frames"}` or a bare
    /// array of frames
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str(json).context("Invalid recording")? {
            RecordingFile::Framed {
                interval_ms,
                looped,
                frames,
            } => Self::new(frames, interval_ms, looped),
            RecordingFile::Bare(frames) => Self::new(frames, DEFAULT_INTERVAL_MS, false),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recording {}", path.display()))?;
        let player = Self::from_json(&json)
            .with_context(|| format!("Failed to parse recording {}", path.display()))?;
        info!(
            "Loaded recording with {} frames from {}",
            player.frame_count(),
            path.display()
        );
        Ok(player)
    }

    /// Single-frame recording of a captured mid-race classification
    pub fn builtin() -> Self {
        let frame = serde_json::to_value(builtin_capture()).unwrap_or_default();
        Self {
            frames: vec![frame],
            interval_ms: DEFAULT_INTERVAL_MS,
            looped: false,
            sessions: SessionRegistry::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Index of the frame showing after `elapsed_ms` of playback
    pub fn frame_index(&self, elapsed_ms: u64) -> usize {
        let tick = usize::try_from(elapsed_ms / self.interval_ms).unwrap_or(usize::MAX);
        if self.looped {
            tick % self.frames.len()
        } else {
            tick.min(self.frames.len() - 1)
        }
    }

    pub fn frame_at(&self, elapsed_ms: u64) -> &serde_json::Value {
        &self.frames[self.frame_index(elapsed_ms)]
    }
}

impl TimingSource for SnapshotPlayer {
    fn name(&self) -> &str {
        "Snapshot"
    }

    fn snapshot(&self, session: &str, now: DateTime<Utc>) -> Result<serde_json::Value> {
        let elapsed_ms = self.sessions.elapsed_since(session, now);
        let index = self.frame_index(elapsed_ms);
        debug!(session, index, "Playing snapshot frame");
        Ok(self.frames[index].clone())
    }

    fn reset(&self, session: &str, now: DateTime<Utc>) -> ResetAck {
        let start = self.sessions.reset(session, now);
        info!(session, "Snapshot playback reset");
        ResetAck::new(session, start)
    }
}

/// (id, name, laps, last lap ms, total ms), already in classification order
const CAPTURE: [(&str, &str, u32, u64, u64); 6] = [
    ("27", "ROSSI Marco", 3, 95_234, 285_702),
    ("14", "BIANCHI Luca", 3, 96_512, 289_536),
    ("55", "VERDI Giuseppe", 3, 97_891, 293_673),
    ("8", "NERI Alessandro", 2, 98_234, 196_468),
    ("33", "GIALLI Franco", 2, 99_102, 198_204),
    ("71", "RUSSO Antonio", 2, 100_456, 200_912),
];

fn builtin_capture() -> Standings {
    let (_, _, leader_laps, _, leader_total) = CAPTURE[0];

    let records = CAPTURE
        .iter()
        .enumerate()
        .map(|(position, &(id, name, laps, last_lap, total))| {
            let gap = if laps < leader_laps {
                format_lap_gap(leader_laps - laps)
            } else {
                format_gap(total.saturating_sub(leader_total))
            };
            Record {
                id: id.to_string(),
                name: name.to_string(),
                laps: laps.to_string(),
                last_lap: format_lap_time(last_lap),
                total_time: format_lap_time(total),
                rank: (position + 1).to_string(),
                gap,
            }
        })
        .collect();

    Standings(
        Header {
            elapsed: format_clock(leader_total),
            remaining: "30:00".to_string(),
        },
        records,
    )
}
