//! Session clock registry
//!
//! Maps an opaque session key to the instant its race clock started. Every
//! operation takes "now" from the caller so the registry never reads a clock.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Session key used when a request does not name one
pub const DEFAULT_SESSION: &str = "default";

/// Normalize an optional, possibly blank session key
pub fn session_key(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(key) if !key.is_empty() => key,
        _ => DEFAULT_SESSION,
    }
}

/// Registry of session start instants
///
/// Entries live for the process lifetime. The check-then-set of a new key
/// happens under one lock, so concurrent first requests agree on the start.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    starts: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        // The map holds plain timestamps, so a poisoned lock is still consistent
        self.starts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start instant for `key`, initialized to `now` on first reference
    pub fn resolve_start(&self, key: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        let mut starts = self.lock();
        *starts.entry(key.to_string()).or_insert(now)
    }

    /// Restart the clock for `key` at `now`
    pub fn reset(&self, key: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        self.lock().insert(key.to_string(), now);
        now
    }

    /// Milliseconds since the session started, never negative
    pub fn elapsed_since(&self, key: &str, now: DateTime<Utc>) -> u64 {
        let start = self.resolve_start(key, now);
        (now - start).num_milliseconds().max(0) as u64
    }

    /// Number of known sessions
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
