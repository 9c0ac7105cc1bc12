use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::block::BlockStatus;

/// Every state change in a block session produces an Event.
///
/// The host polls for events by driving the session; what a check-in or a
/// block end *does* (launch a mini-game, prompt for feedback) is entirely
/// the host's decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    BlockStarted {
        session_id: Uuid,
        total_ms: u64,
        check_in_offsets_ms: Vec<u64>,
        at: DateTime<Utc>,
    },
    BlockPaused {
        session_id: Uuid,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    BlockResumed {
        session_id: Uuid,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// A scheduled check-in offset was crossed. Fires exactly once per
    /// offset, in ascending order.
    CheckInDue {
        session_id: Uuid,
        offset_ms: u64,
        /// Position of this check-in within the normalized schedule.
        index: usize,
        at: DateTime<Utc>,
    },
    /// The block ran to its full duration. Fires at most once per session.
    BlockCompleted {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    /// The block was cancelled before its natural end.
    BlockStopped {
        session_id: Uuid,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        session_id: Uuid,
        status: BlockStatus,
        total_ms: u64,
        elapsed_ms: u64,
        remaining_ms: u64,
        next_check_in_ms: Option<u64>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

/// Event timestamp from the caller-supplied clock.
///
/// Falls back to the epoch origin on out-of-range input rather than
/// panicking; session arithmetic never depends on this value.
pub(crate) fn at(now_ms: u64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(now_ms as i64).unwrap_or_default()
}
