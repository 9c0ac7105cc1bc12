//! # Focusblock Core Library
//!
//! Core engine for Focusblock focus-block sessions. The library is
//! host-agnostic: a CLI, a desktop shell, or a browser-extension bridge all
//! drive the same session type and react to the same events.
//!
//! ## Architecture
//!
//! - **Block engine**: a wall-clock-based state machine. It owns no thread
//!   and never reads the clock; the host calls `tick(now_ms)` periodically
//!   and receives the events (check-ins due, block completed) produced by
//!   that step
//! - **Storage**: TOML configuration plus a JSON snapshot of the active
//!   session so a torn-down host can restore mid-block
//! - **HUD helpers**: the action-chain streak counter and countdown
//!   formatting the in-block display is built from
//!
//! ## Key Components
//!
//! - [`BlockSession`]: block lifecycle state machine
//! - [`CheckInSpec`] / [`CheckInSchedule`]: check-in normalization and firing
//! - [`Event`]: everything a host reacts to
//! - [`Config`] / [`SessionStore`]: configuration and session persistence

pub mod block;
pub mod chain;
pub mod clock;
pub mod error;
pub mod events;
pub mod guard;
pub mod storage;

pub use block::{
    BlockSession, BlockStatus, CheckInSchedule, CheckInSpec, ElapsedTracker,
    DEFAULT_BLOCK_MINUTES,
};
pub use chain::ActionChain;
pub use error::{ConfigError, CoreError, StateError};
pub use events::Event;
pub use guard::StartGuard;
pub use storage::{Config, SessionStore};
