//! Effective elapsed time for a running block.
//!
//! All arithmetic is done from absolute epoch-millisecond timestamps, so the
//! accumulated value is exact to the caller's polling granularity -- there is
//! no per-tick delta accumulation and therefore no drift.

use serde::{Deserialize, Serialize};

/// Tracks wall-clock elapsed time for a block, excluding paused intervals.
///
/// The tracker never reads the clock itself; every operation takes the
/// current time as an argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElapsedTracker {
    /// Epoch ms at which tracking began. Set once, never mutated.
    started_at_ms: u64,
    /// Total time spent paused so far.
    paused_accum_ms: u64,
    /// Epoch ms at which the current pause began. `Some` exactly while paused.
    #[serde(default)]
    pause_started_at_ms: Option<u64>,
}

impl ElapsedTracker {
    pub fn start(now_ms: u64) -> Self {
        Self {
            started_at_ms: now_ms,
            paused_accum_ms: 0,
            pause_started_at_ms: None,
        }
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn paused_accum_ms(&self) -> u64 {
        self.paused_accum_ms
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_at_ms.is_some()
    }

    /// Mark the start of a paused interval. No-op if already paused.
    ///
    /// Returns whether the call changed state.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if self.pause_started_at_ms.is_some() {
            return false;
        }
        self.pause_started_at_ms = Some(now_ms);
        true
    }

    /// Fold the current paused interval into the accumulator. No-op if not
    /// paused.
    ///
    /// Returns whether the call changed state.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        match self.pause_started_at_ms.take() {
            Some(pause_start) => {
                self.paused_accum_ms = self
                    .paused_accum_ms
                    .saturating_add(now_ms.saturating_sub(pause_start));
                true
            }
            None => false,
        }
    }

    /// Effective elapsed time at `now_ms`.
    ///
    /// While paused the value is frozen at the instant the pause began,
    /// whatever `now_ms` the caller supplies.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let effective_now = match self.pause_started_at_ms {
            Some(pause_start) => pause_start,
            None => now_ms,
        };
        effective_now
            .saturating_sub(self.started_at_ms)
            .saturating_sub(self.paused_accum_ms)
    }
}
