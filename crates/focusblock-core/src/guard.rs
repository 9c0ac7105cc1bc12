//! Duplicate-start debounce.
//!
//! Redundant UI surfaces (popup button plus a message listener) can both
//! request a block start within the same instant. The guard accepts the
//! first request and rejects any follow-up inside the debounce window, so a
//! session is never double-initialized.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEBOUNCE_MS: u64 = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartGuard {
    window_ms: u64,
    #[serde(default)]
    last_start_ms: Option<u64>,
}

impl Default for StartGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl StartGuard {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE_MS)
    }

    pub fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_start_ms: None,
        }
    }

    /// Guard seeded with a previously accepted start, for hosts that are
    /// torn down between triggers and reconstruct the guard from persisted
    /// session state.
    pub fn with_last_start(window_ms: u64, last_start_ms: Option<u64>) -> Self {
        Self {
            window_ms,
            last_start_ms,
        }
    }

    /// Returns `true` and records the trigger if enough time has passed
    /// since the previous accepted start; `false` for a duplicate inside
    /// the window.
    pub fn try_start(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_start_ms {
            if now_ms.saturating_sub(last) < self.window_ms {
                return false;
            }
        }
        self.last_start_ms = Some(now_ms);
        true
    }
}
