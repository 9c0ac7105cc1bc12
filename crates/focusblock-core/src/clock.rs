//! Wall-clock access and display formatting.
//!
//! The session engine itself never reads the clock; hosts call [`now_ms`]
//! and pass the value in.

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// `MM:SS` countdown rendering for HUD/CLI display.
///
/// Minutes widen past two digits rather than wrapping.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1_000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn formats_sub_minute() {
        assert_eq!(format_clock(59_999), "00:59");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(5 * 60_000 + 7_000), "05:07");
        assert_eq!(format_clock(20 * 60_000), "20:00");
    }

    #[test]
    fn long_durations_widen() {
        assert_eq!(format_clock(125 * 60_000), "125:00");
    }
}
