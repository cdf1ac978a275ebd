//! Live Timing Relay Server Library
//!
//! Exposes server components for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod upstream;
