//! Lap progression
//!
//! Derives a competitor's completed laps from elapsed time by adding laps one
//! at a time, since each lap can have a different duration. Nothing is carried
//! between calls: the same inputs always give the same progress.

use crate::config::SimulationConfig;
use ltr_core::CompetitorDef;

/// Lap counters for one competitor at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapProgress {
    /// Time on track after the grid-slot offset
    pub effective_ms: u64,
    pub completed_laps: u32,

    /// Exact sum of the completed laps
    pub cumulative_ms: u64,

    /// Most recent completed lap, or the nominal lap before the first one
    pub last_lap_ms: u64,
}

/// Start delay for a grid slot
pub fn start_offset_ms(def: &CompetitorDef, slot_delay_ms: u64) -> u64 {
    u64::from(def.start_slot.saturating_sub(1)).saturating_mul(slot_delay_ms)
}

/// Integer hash used as a noise source
fn noise(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic offset in `[-amplitude, amplitude]` for a competitor's lap
///
/// Keyed on lap index rather than elapsed time, so a completed lap keeps its
/// duration on every later request.
pub fn jitter(competitor_index: usize, lap_index: u32, amplitude: u64) -> i64 {
    if amplitude == 0 {
        return 0;
    }
    let amplitude = amplitude.min(i64::MAX as u64 / 2);
    let seed = ((competitor_index as u64) << 32) | u64::from(lap_index);
    let span = amplitude * 2 + 1;
    (noise(seed) % span) as i64 - amplitude as i64
}

/// Duration of one lap, never shorter than 1 ms
pub fn lap_duration(def: &CompetitorDef, competitor_index: usize, lap_index: u32, jitter_ms: u64) -> u64 {
    let nominal = i64::try_from(def.nominal_lap_ms).unwrap_or(i64::MAX);
    let duration = nominal
        .saturating_add(def.variation_for_lap(lap_index))
        .saturating_add(jitter(competitor_index, lap_index, jitter_ms));
    duration.max(1) as u64
}

/// Laps completed by `def` after `elapsed_ms` of race time
///
/// Stops silently at `config.lap_count_cap`.
pub fn progress(def: &CompetitorDef, competitor_index: usize, elapsed_ms: u64, config: &SimulationConfig) -> LapProgress {
    let effective_ms = elapsed_ms.saturating_sub(start_offset_ms(def, config.slot_delay_ms));

    let mut state = LapProgress {
        effective_ms,
        completed_laps: 0,
        cumulative_ms: 0,
        last_lap_ms: def.nominal_lap_ms,
    };

    for lap_index in 0..config.lap_count_cap {
        let duration = lap_duration(def, competitor_index, lap_index, config.jitter_ms);
        match state.cumulative_ms.checked_add(duration) {
            Some(total) if total <= effective_ms => {
                state.completed_laps += 1;
                state.cumulative_ms = total;
                state.last_lap_ms = duration;
            }
            _ => break,
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_config() -> SimulationConfig {
        SimulationConfig {
            slot_delay_ms: 1_000,
            jitter_ms: 0,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_no_laps_at_start() {
        let def = CompetitorDef::new("1", "A", 90_000, 1);
        let p = progress(&def, 0, 0, &flat_config());
        assert_eq!(p.completed_laps, 0);
        assert_eq!(p.cumulative_ms, 0);
        assert_eq!(p.last_lap_ms, 90_000);
    }

    #[test]
    fn test_lap_commits_on_exact_boundary() {
        let def = CompetitorDef::new("1", "A", 90_000, 1);
        assert_eq!(progress(&def, 0, 89_999, &flat_config()).completed_laps, 0);
        assert_eq!(progress(&def, 0, 90_000, &flat_config()).completed_laps, 1);
    }

    #[test]
    fn test_variation_sequence_is_cycled() {
        let def = CompetitorDef::new("1", "A", 90_000, 1).with_variation(vec![1_000, -500]);
        let p = progress(&def, 0, 400_000, &flat_config());

        // 91000 + 89500 + 91000 + 89500 = 361000, the fifth lap ends at 452000
        assert_eq!(p.completed_laps, 4);
        assert_eq!(p.cumulative_ms, 361_000);
        assert_eq!(p.last_lap_ms, 89_500);
    }

    #[test]
    fn test_start_slot_offsets_effective_time() {
        let def = CompetitorDef::new("2", "B", 90_000, 3);
        let p = progress(&def, 1, 91_500, &flat_config());
        assert_eq!(p.effective_ms, 89_500);
        assert_eq!(p.completed_laps, 0);

        let p = progress(&def, 1, 500, &flat_config());
        assert_eq!(p.effective_ms, 0);
    }

    #[test]
    fn test_lap_count_cap_stops_progress() {
        let def = CompetitorDef::new("1", "A", 1_000, 1);
        let config = SimulationConfig {
            lap_count_cap: 5,
            ..flat_config()
        };
        let p = progress(&def, 0, 1_000_000, &config);
        assert_eq!(p.completed_laps, 5);
        assert_eq!(p.cumulative_ms, 5_000);
    }

    #[test]
    fn test_lap_duration_never_below_one_ms() {
        let def = CompetitorDef::new("1", "A", 100, 1).with_variation(vec![-10_000]);
        assert_eq!(lap_duration(&def, 0, 0, 0), 1);
    }

    #[test]
    fn test_jitter_is_bounded_and_reproducible() {
        for competitor in 0..6 {
            for lap in 0..50 {
                let j = jitter(competitor, lap, 1_000);
                assert!((-1_000..=1_000).contains(&j));
                assert_eq!(j, jitter(competitor, lap, 1_000));
            }
        }
        assert_eq!(jitter(3, 7, 0), 0);
    }

    #[test]
    fn test_jitter_varies_between_laps() {
        let values: std::collections::HashSet<i64> = (0..20).map(|lap| jitter(0, lap, 1_000)).collect();
        assert!(values.len() > 1);
    }

    #[test]
    fn test_progress_is_monotonic_with_jitter() {
        let def = CompetitorDef::new("1", "A", 95_000, 2).with_variation(vec![234, -120, 410]);
        let config = SimulationConfig::default();

        let mut previous = progress(&def, 1, 0, &config);
        for elapsed in (0..2_000_000).step_by(7_919) {
            let current = progress(&def, 1, elapsed, &config);
            assert!(current.completed_laps >= previous.completed_laps);
            assert!(current.cumulative_ms >= previous.cumulative_ms);
            assert!(current.cumulative_ms <= current.effective_ms);
            previous = current;
        }
    }

    #[test]
    fn test_cumulative_is_exact_sum_of_laps() {
        let def = CompetitorDef::new("1", "A", 95_000, 1).with_variation(vec![500, -700]);
        let config = SimulationConfig::default();
        let p = progress(&def, 4, 1_234_567, &config);

        let sum: u64 = (0..p.completed_laps).map(|lap| lap_duration(&def, 4, lap, config.jitter_ms)).sum();
        assert_eq!(p.cumulative_ms, sum);
        assert_eq!(p.last_lap_ms, lap_duration(&def, 4, p.completed_laps - 1, config.jitter_ms));
    }
}
