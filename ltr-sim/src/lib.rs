//! Local timing sources for Live Timing Relay

pub mod config;
pub mod lap;
pub mod roster;
pub mod simulator;
pub mod snapshot;
pub mod standings;

pub use config::{RosterFile, SimulationConfig};
pub use simulator::RaceSimulator;
pub use snapshot::SnapshotPlayer;
