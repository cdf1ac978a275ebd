//! Integration tests for the RaceSimulator and SnapshotPlayer

use chrono::{DateTime, Duration, TimeZone, Utc};
use ltr_core::{CompetitorDef, Roster, TimingSource};
use ltr_sim::{RaceSimulator, SimulationConfig, SnapshotPlayer};

fn t0() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

fn flat_config(slot_delay_ms: u64) -> SimulationConfig {
    SimulationConfig {
        slot_delay_ms,
        jitter_ms: 0,
        ..SimulationConfig::default()
    }
}

fn simulator(competitors: Vec<CompetitorDef>, config: SimulationConfig) -> RaceSimulator {
    RaceSimulator::new(Roster::new(competitors).unwrap(), config)
}

#[test]
fn test_simulator_name() {
    let sim = RaceSimulator::default();
    assert_eq!(sim.name(), "Simulator");
}

#[test]
fn test_two_identical_competitors_scenario() {
    let sim = simulator(
        vec![
            CompetitorDef::new("1", "One", 90_000, 1),
            CompetitorDef::new("2", "Two", 90_000, 1),
        ],
        flat_config(1_000),
    );

    let states = sim.race_states_at(0);
    assert!(states.iter().all(|s| s.progress.completed_laps == 0));

    let states = sim.race_states_at(95_000);
    for state in &states {
        assert_eq!(state.progress.completed_laps, 1);
        assert_eq!(state.progress.last_lap_ms, 90_000);
    }
}

#[test]
fn test_staggered_start_scenario() {
    let sim = simulator(
        vec![
            CompetitorDef::new("1", "One", 400, 1),
            CompetitorDef::new("2", "Two", 400, 2),
        ],
        flat_config(1_000),
    );

    let states = sim.race_states_at(500);
    let second = states.iter().find(|s| s.competitor.id == "2").unwrap();
    assert_eq!(second.progress.effective_ms, 0);
    assert_eq!(second.progress.completed_laps, 0);

    let first = states.iter().find(|s| s.competitor.id == "1").unwrap();
    assert_eq!(first.progress.completed_laps, 1);
}

#[test]
fn test_lap_down_gap_scenario() {
    let sim = simulator(
        vec![
            CompetitorDef::new("A", "Alpha", 60_000, 1),
            CompetitorDef::new("B", "Bravo", 80_000, 1),
        ],
        flat_config(1_000),
    );

    let standings = sim.standings_at(185_000);
    let records = standings.records();
    assert_eq!(records[0].id, "A");
    assert_eq!(records[0].laps, "3");
    assert_eq!(records[1].id, "B");
    assert_eq!(records[1].laps, "2");
    assert_eq!(records[1].gap, "+1 lap");
}

#[test]
fn test_live_is_idempotent_for_same_instant() {
    let sim = RaceSimulator::default();
    sim.live("s", t0());

    let now = t0() + Duration::seconds(612);
    let first = sim.live("s", now);
    let second = sim.live("s", now);
    assert_eq!(first, second);
}

#[test]
fn test_live_laps_are_monotonic_over_time() {
    let sim = RaceSimulator::default();
    sim.live("mono", t0());

    let mut previous = sim.race_states_at(0);
    for second in (10..2_400).step_by(10) {
        let current = sim.race_states_at(second * 1_000);
        for state in &current {
            let before = previous
                .iter()
                .find(|p| p.competitor.id == state.competitor.id)
                .unwrap();
            assert!(state.progress.completed_laps >= before.progress.completed_laps);
            assert!(state.progress.cumulative_ms <= state.progress.effective_ms);
        }
        previous = current;
    }
}

#[test]
fn test_reset_round_trip_reads_zero_laps() {
    let sim = RaceSimulator::default();
    sim.live("demo", t0());

    let later = t0() + Duration::minutes(20);
    let before = sim.live("demo", later);
    assert!(before.records().iter().any(|r| r.laps != "0"));

    let ack = sim.reset("demo", later);
    assert_eq!(ack.session, "demo");
    assert_eq!(ack.start_time, later.timestamp_millis());
    assert_eq!(sim.sessions().elapsed_since("demo", later), 0);

    let after = sim.live("demo", later + Duration::milliseconds(20));
    assert_eq!(after.header().elapsed, "0:00");
    assert!(after.records().iter().all(|r| r.laps == "0"));
}

#[test]
fn test_sessions_progress_independently() {
    let sim = RaceSimulator::default();
    sim.live("early", t0());
    sim.live("late", t0() + Duration::minutes(10));

    let now = t0() + Duration::minutes(10);
    assert_eq!(sim.live("early", now).header().elapsed, "10:00");
    assert_eq!(sim.live("late", now).header().elapsed, "0:00");
}

#[test]
fn test_empty_roster_snapshot() {
    let sim = simulator(Vec::new(), SimulationConfig::default());
    let value = sim.snapshot("default", t0()).unwrap();
    let array = value.as_array().expect("payload should be an array");

    assert_eq!(array.len(), 2);
    assert_eq!(array[1].as_array().unwrap().len(), 0);
}

#[test]
fn test_snapshot_serializes_wire_format() {
    let sim = RaceSimulator::default();
    sim.live("wire", t0());

    let value = sim.snapshot("wire", t0() + Duration::seconds(300)).unwrap();
    let header = &value[0];
    assert_eq!(header["e"], "5:00");
    assert_eq!(header["r"], "30:00");

    let records = value[1].as_array().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["c"], "1");
    assert_eq!(records[0]["d"], "");
    for record in records {
        for key in ["n", "p", "g", "j", "t", "c", "d"] {
            assert!(record[key].is_string(), "record field {} should be a string", key);
        }
    }
}

#[test]
fn test_snapshot_player_plays_per_session() {
    let player = SnapshotPlayer::from_json(r#"{"interval_ms": 1000, "frames": ["a", "b", "c"]}"#).unwrap();
    assert_eq!(player.name(), "Snapshot");

    assert_eq!(player.snapshot("x", t0()).unwrap(), "a");
    assert_eq!(player.snapshot("x", t0() + Duration::milliseconds(1_500)).unwrap(), "b");
    assert_eq!(player.snapshot("y", t0() + Duration::milliseconds(1_500)).unwrap(), "a");

    player.reset("x", t0() + Duration::seconds(10));
    assert_eq!(player.snapshot("x", t0() + Duration::seconds(10)).unwrap(), "a");
}

#[test]
fn test_builtin_snapshot_is_standings_payload() {
    let player = SnapshotPlayer::builtin();
    let value = player.snapshot("default", t0()).unwrap();

    assert_eq!(value[1][0]["n"], "27");
    assert_eq!(value[1][0]["j"], "1:35.234");
    assert_eq!(value[1][5]["d"], "+1 lap");
}
