//! Block session state machine.
//!
//! A session composes the elapsed-time tracker and the check-in schedule
//! into one lifecycle:
//!
//! ```text
//! Running -> (Paused <-> Running) -> Ended
//! ```
//!
//! The session does not run on its own thread and never reads the clock --
//! the host drives it with periodic `tick(now_ms)` calls (conventionally
//! once per second) plus pause/resume/stop commands. `Ended` is terminal;
//! a finished session is discarded and a new one constructed per block.
//!
//! Invalid transitions (`resume` while running, `tick` after `Ended`, ...)
//! are no-ops, never errors; callers do not need to guard with status
//! checks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schedule::{CheckInSchedule, CheckInSpec};
use super::tracker::ElapsedTracker;
use crate::events::{at, Event};

/// Block length used when the requested minutes are not positive.
pub const DEFAULT_BLOCK_MINUTES: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    Running,
    Paused,
    Ended,
}

/// A single focus block with check-in scheduling.
///
/// Owned by exactly one host at a time; all commands take the current time
/// in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSession {
    id: Uuid,
    total_ms: u64,
    tracker: ElapsedTracker,
    schedule: CheckInSchedule,
    status: BlockStatus,
}

impl BlockSession {
    /// Construct a session and start it immediately.
    ///
    /// Non-positive `minutes` falls back to [`DEFAULT_BLOCK_MINUTES`].
    /// Returns the running session and its `BlockStarted` event.
    pub fn start(minutes: f64, specs: &[CheckInSpec], now_ms: u64) -> (Self, Event) {
        let total_ms = if minutes.is_finite() && minutes > 0.0 {
            (minutes * 60_000.0).round() as u64
        } else {
            DEFAULT_BLOCK_MINUTES * 60_000
        };
        let session = Self {
            id: Uuid::new_v4(),
            total_ms,
            tracker: ElapsedTracker::start(now_ms),
            schedule: CheckInSchedule::normalize(total_ms, specs),
            status: BlockStatus::Running,
        };
        let event = Event::BlockStarted {
            session_id: session.id,
            total_ms,
            check_in_offsets_ms: session.schedule.offsets_ms().to_vec(),
            at: at(now_ms),
        };
        (session, event)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> BlockStatus {
        self.status
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// Wall-clock instant the block began.
    pub fn started_at_ms(&self) -> u64 {
        self.tracker.started_at_ms()
    }

    pub fn check_in_offsets_ms(&self) -> &[u64] {
        self.schedule.offsets_ms()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.tracker.elapsed_ms(now_ms)
    }

    /// Time left in the block. Frozen while paused, zero once ended.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        if self.status == BlockStatus::Ended {
            return 0;
        }
        self.total_ms.saturating_sub(self.elapsed_ms(now_ms))
    }

    /// Countdown to the next unfired check-in, `None` when none remain.
    pub fn next_check_in_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        if self.status == BlockStatus::Ended {
            return None;
        }
        self.schedule.next_remaining_ms(self.elapsed_ms(now_ms))
    }

    /// 0.0 .. 100.0 progress through the block.
    pub fn progress_pct(&self, now_ms: u64) -> f64 {
        if self.total_ms == 0 {
            return 100.0;
        }
        if self.status == BlockStatus::Ended {
            return 100.0;
        }
        (self.elapsed_ms(now_ms) as f64 / self.total_ms as f64 * 100.0).min(100.0)
    }

    /// Build a full state snapshot event for display.
    pub fn snapshot(&self, now_ms: u64) -> Event {
        Event::StateSnapshot {
            session_id: self.id,
            status: self.status,
            total_ms: self.total_ms,
            elapsed_ms: self.elapsed_ms(now_ms),
            remaining_ms: self.remaining_ms(now_ms),
            next_check_in_ms: self.next_check_in_remaining_ms(now_ms),
            progress_pct: self.progress_pct(now_ms),
            at: at(now_ms),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Suspend the clock (check-ins stop counting against focus time).
    pub fn pause(&mut self, now_ms: u64) -> Option<Event> {
        if self.status != BlockStatus::Running {
            return None;
        }
        self.tracker.pause(now_ms);
        self.status = BlockStatus::Paused;
        Some(Event::BlockPaused {
            session_id: self.id,
            remaining_ms: self.remaining_ms(now_ms),
            at: at(now_ms),
        })
    }

    pub fn resume(&mut self, now_ms: u64) -> Option<Event> {
        if self.status != BlockStatus::Paused {
            return None;
        }
        self.tracker.resume(now_ms);
        self.status = BlockStatus::Running;
        Some(Event::BlockResumed {
            session_id: self.id,
            remaining_ms: self.remaining_ms(now_ms),
            at: at(now_ms),
        })
    }

    /// Unconditional cancellation. Terminal; later ticks are ignored.
    pub fn stop(&mut self, now_ms: u64) -> Option<Event> {
        if self.status == BlockStatus::Ended {
            return None;
        }
        let remaining_ms = self.remaining_ms(now_ms);
        self.status = BlockStatus::Ended;
        Some(Event::BlockStopped {
            session_id: self.id,
            remaining_ms,
            at: at(now_ms),
        })
    }

    /// Advance the session to `now_ms`.
    ///
    /// Fires every check-in whose offset the effective elapsed time has
    /// crossed -- all of them when a tick skips several at once -- then
    /// `BlockCompleted` on the tick where remaining time reaches zero.
    /// Check-ins due on the final tick fire before the completion event.
    /// Returns nothing while paused; display values stay frozen and can be
    /// read through [`snapshot`](Self::snapshot) at any time.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        if self.status != BlockStatus::Running {
            return events;
        }

        let elapsed = self.tracker.elapsed_ms(now_ms);
        for offset_ms in self.schedule.advance(elapsed) {
            // Offsets are strictly increasing, so position == schedule index.
            let index = self
                .schedule
                .offsets_ms()
                .iter()
                .position(|o| *o == offset_ms)
                .unwrap_or(0);
            events.push(Event::CheckInDue {
                session_id: self.id,
                offset_ms,
                index,
                at: at(now_ms),
            });
        }

        if elapsed >= self.total_ms {
            self.status = BlockStatus::Ended;
            events.push(Event::BlockCompleted {
                session_id: self.id,
                at: at(now_ms),
            });
        }
        events
    }
}
