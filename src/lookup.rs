//! Debounce and request-generation guards for the Pantone lookups.
//!
//! Time is passed in by the caller so the gates stay independent of any
//! timer or event loop. Stale timers are harmless: they poll, find a newer
//! generation or an unfinished quiet window, and get nothing.

use std::time::{Duration, Instant};

/// Identifies one issued request. Only the latest one may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter; last started request wins.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    latest: u64,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Whether a result for `generation` may still be applied.
    pub fn accept(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    /// Invalidate everything in flight.
    pub fn cancel(&mut self) {
        self.latest += 1;
    }
}

/// Lookup that fires once after a quiet window with no further changes.
///
/// Each [`notify_change`](Self::notify_change) bumps the generation and
/// restarts the window. [`poll`](Self::poll) hands out the current
/// generation once the window has elapsed, at most once per generation.
#[derive(Debug, Clone)]
pub struct DebouncedLookup {
    quiet: Duration,
    gate: RequestGate,
    current: Generation,
    last_change: Option<Instant>,
    issued: Option<Generation>,
}

impl DebouncedLookup {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            gate: RequestGate::new(),
            current: Generation(0),
            last_change: None,
            issued: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Generation of the most recent change.
    pub fn generation(&self) -> Generation {
        self.current
    }

    /// Record a change of the watched value.
    pub fn notify_change(&mut self, now: Instant) {
        self.current = self.gate.issue();
        self.last_change = Some(now);
    }

    /// When the pending change becomes due, if one is pending.
    pub fn due_at(&self) -> Option<Instant> {
        if self.issued == Some(self.current) {
            return None;
        }
        self.last_change.map(|t| t + self.quiet)
    }

    /// Returns the generation to fetch if the quiet window has elapsed and
    /// that generation has not been fetched yet.
    pub fn poll(&mut self, now: Instant) -> Option<Generation> {
        let due = self.due_at()?;
        if now < due {
            return None;
        }
        self.issued = Some(self.current);
        Some(self.current)
    }

    /// Whether a result fetched for `generation` is still current.
    pub fn accept(&self, generation: Generation) -> bool {
        self.gate.accept(generation) && self.issued == Some(generation)
    }

    /// Drop any pending or in-flight lookup.
    pub fn cancel(&mut self) {
        self.gate.cancel();
        self.current = Generation(self.gate.latest);
        self.last_change = None;
        self.issued = None;
    }
}
