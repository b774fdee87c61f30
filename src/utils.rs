use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const APP_NAME: &str = "colloquy";

/// Returns the current UTC time formatted as an RFC3339 string, the format
/// every `created_at` column stores.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Source of the opaque suffix appended to entity prefixes such as `thread-`
/// and `comment-`. The sequence variant hands out pre-arranged suffixes in
/// order and falls back to random once drained.
#[derive(Clone)]
pub enum IdSource {
    Random,
    Sequence(Arc<Mutex<VecDeque<String>>>),
}

impl IdSource {
    pub fn random() -> Self {
        IdSource::Random
    }

    pub fn sequence<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = suffixes.into_iter().map(Into::into).collect();
        IdSource::Sequence(Arc::new(Mutex::new(queue)))
    }

    pub fn next(&self) -> String {
        match self {
            IdSource::Random => Uuid::new_v4().simple().to_string(),
            IdSource::Sequence(queue) => queue
                .lock()
                .ok()
                .and_then(|mut queue| queue.pop_front())
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
        }
    }
}

/// Timestamp source for `created_at` columns. The sequence variant hands out
/// pre-arranged stamps in order and falls back to the system clock once
/// drained.
#[derive(Clone)]
pub enum Clock {
    System,
    Sequence(Arc<Mutex<VecDeque<String>>>),
}

impl Clock {
    pub fn system() -> Self {
        Clock::System
    }

    pub fn sequence<I, S>(stamps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = stamps.into_iter().map(Into::into).collect();
        Clock::Sequence(Arc::new(Mutex::new(queue)))
    }

    pub fn now(&self) -> String {
        match self {
            Clock::System => now_utc_iso(),
            Clock::Sequence(queue) => queue
                .lock()
                .ok()
                .and_then(|mut queue| queue.pop_front())
                .unwrap_or_else(now_utc_iso),
        }
    }
}
