//! Standings composition
//!
//! Ranks competitors by laps completed (descending), then cumulative time
//! (ascending), then grid slot. Competitors still on their first lap all have
//! zero cumulative time, so among them grid order decides. The sort is stable,
//! so roster order settles any remaining tie.

use crate::config::SimulationConfig;
use crate::lap::{progress, LapProgress};
use ltr_core::format::{format_clock, format_gap, format_lap_gap, format_lap_time};
use ltr_core::{CompetitorDef, Header, Record, Roster, Standings};
use std::cmp::Ordering;

/// A competitor's derived state after ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceState<'a> {
    pub competitor: &'a CompetitorDef,
    pub progress: LapProgress,

    /// 1-based position
    pub rank: usize,

    /// Empty for the leader
    pub gap: String,
}

impl RaceState<'_> {
    pub fn to_record(&self) -> Record {
        Record {
            id: self.competitor.id.clone(),
            name: self.competitor.display_name.clone(),
            laps: self.progress.completed_laps.to_string(),
            last_lap: format_lap_time(self.progress.last_lap_ms),
            total_time: format_lap_time(self.progress.cumulative_ms),
            rank: self.rank.to_string(),
            gap: self.gap.clone(),
        }
    }
}

fn running_order(a: &(&CompetitorDef, LapProgress), b: &(&CompetitorDef, LapProgress)) -> Ordering {
    b.1.completed_laps
        .cmp(&a.1.completed_laps)
        .then(a.1.cumulative_ms.cmp(&b.1.cumulative_ms))
        .then(a.0.start_slot.cmp(&b.0.start_slot))
}

fn gap_to_leader(
    leader: (&CompetitorDef, LapProgress),
    competitor: &CompetitorDef,
    progress: &LapProgress,
    slot_delay_ms: u64,
) -> String {
    let (leader_def, leader_progress) = leader;

    if progress.completed_laps < leader_progress.completed_laps {
        return format_lap_gap(leader_progress.completed_laps - progress.completed_laps);
    }

    if leader_progress.completed_laps == 0 {
        // Nobody has a lap yet: the gap is the grid stagger
        let slots_behind = competitor.start_slot.saturating_sub(leader_def.start_slot);
        return format_gap(u64::from(slots_behind).saturating_mul(slot_delay_ms));
    }

    format_gap(progress.cumulative_ms.saturating_sub(leader_progress.cumulative_ms))
}

/// Rank every competitor in `roster` at `elapsed_ms`
pub fn rank<'a>(roster: &'a Roster, elapsed_ms: u64, config: &SimulationConfig) -> Vec<RaceState<'a>> {
    let mut running: Vec<(&CompetitorDef, LapProgress)> = roster
        .iter()
        .enumerate()
        .map(|(index, def)| (def, progress(def, index, elapsed_ms, config)))
        .collect();

    running.sort_by(running_order);

    let Some(&leader) = running.first() else {
        return Vec::new();
    };

    running
        .into_iter()
        .enumerate()
        .map(|(position, (competitor, progress))| {
            let gap = if position == 0 {
                String::new()
            } else {
                gap_to_leader(leader, competitor, &progress, config.slot_delay_ms)
            };
            RaceState {
                competitor,
                progress,
                rank: position + 1,
                gap,
            }
        })
        .collect()
}

/// Race header for `elapsed_ms`
pub fn header(elapsed_ms: u64, config: &SimulationConfig) -> Header {
    let remaining = match config.race_duration_ms {
        Some(total) => format_clock(total.saturating_sub(elapsed_ms)),
        None => config.race_duration_display.clone(),
    };

    Header {
        elapsed: format_clock(elapsed_ms),
        remaining,
    }
}

/// Full `[header, records]` payload for `elapsed_ms`
pub fn compose(roster: &Roster, elapsed_ms: u64, config: &SimulationConfig) -> Standings {
    let records = rank(roster, elapsed_ms, config)
        .iter()
        .map(RaceState::to_record)
        .collect();
    Standings(header(elapsed_ms, config), records)
}
