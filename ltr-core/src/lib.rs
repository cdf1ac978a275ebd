//! Live Timing Relay Core Library
//!
//! This crate provides the timing wire model, display formatting, the
//! session clock registry and the timing source trait shared by the
//! simulator and the relay server.

pub mod adapter;
pub mod error;
pub mod format;
pub mod model;
pub mod session;

pub use adapter::TimingSource;
pub use error::RosterError;
pub use model::{CompetitorDef, Header, Record, ResetAck, Roster, Standings};
pub use session::{session_key, SessionRegistry, DEFAULT_SESSION};
