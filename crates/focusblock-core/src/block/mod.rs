mod schedule;
mod session;
mod tracker;

pub use schedule::{CheckInSchedule, CheckInSpec};
pub use session::{BlockSession, BlockStatus, DEFAULT_BLOCK_MINUTES};
pub use tracker::ElapsedTracker;
