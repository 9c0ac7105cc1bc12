//! Action chain counter for the in-block HUD.
//!
//! Counts user actions (clicks, keystrokes) during a block and flags an
//! "on fire" streak at every multiple of the threshold.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FIRE_THRESHOLD: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionChain {
    count: u64,
    fire_threshold: u64,
}

impl Default for ActionChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionChain {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_FIRE_THRESHOLD)
    }

    /// A zero threshold is treated as the default.
    pub fn with_threshold(fire_threshold: u64) -> Self {
        Self {
            count: 0,
            fire_threshold: if fire_threshold == 0 {
                DEFAULT_FIRE_THRESHOLD
            } else {
                fire_threshold
            },
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Record one user action. Returns whether the chain is now on fire.
    pub fn record_action(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.is_on_fire()
    }

    pub fn is_on_fire(&self) -> bool {
        self.count > 0 && self.count % self.fire_threshold == 0
    }

    /// New block, fresh chain.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_chain_not_on_fire() {
        let chain = ActionChain::new();
        assert_eq!(chain.count(), 0);
        assert!(!chain.is_on_fire());
    }

    #[test]
    fn fires_at_every_threshold_multiple() {
        let mut chain = ActionChain::with_threshold(50);
        for _ in 0..49 {
            assert!(!chain.record_action());
        }
        assert!(chain.record_action());
        assert!(chain.is_on_fire());
        assert!(!chain.record_action());
        for _ in 51..100 {
            chain.record_action();
        }
        assert_eq!(chain.count(), 100);
        assert!(chain.is_on_fire());
    }

    #[test]
    fn reset_clears_count() {
        let mut chain = ActionChain::with_threshold(2);
        chain.record_action();
        chain.record_action();
        assert!(chain.is_on_fire());
        chain.reset();
        assert_eq!(chain.count(), 0);
        assert!(!chain.is_on_fire());
    }

    #[test]
    fn zero_threshold_uses_default() {
        let chain = ActionChain::with_threshold(0);
        assert!(!chain.is_on_fire());
    }
}
