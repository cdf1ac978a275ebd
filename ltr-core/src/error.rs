//! Error types for roster validation

use thiserror::Error;

/// Reasons a roster can be rejected when it is built or loaded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("competitor at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("competitor id '{id}' appears more than once")]
    DuplicateId { id: String },

    #[error("competitor '{id}' has a zero nominal lap time")]
    ZeroLapTime { id: String },

    #[error("competitor '{id}' has start slot 0 (slots are 1-based)")]
    ZeroStartSlot { id: String },
}
