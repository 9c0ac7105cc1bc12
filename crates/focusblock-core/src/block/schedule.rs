//! Check-in schedule normalization and firing.
//!
//! User input arrives as minute offsets ("5, 12") or a single repeat
//! interval ("5" meaning every 5 minutes). Normalization turns either form
//! into a canonical millisecond schedule: expanded, in-range, ascending,
//! deduplicated. An empty result is a valid schedule that never fires.

use serde::{Deserialize, Serialize};

/// One user-supplied check-in request, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "minutes")]
pub enum CheckInSpec {
    /// A single relative offset from block start.
    Offset(f64),
    /// Fires every N minutes until the block ends.
    RepeatEvery(f64),
}

impl CheckInSpec {
    /// Parse the free-form check-in field.
    ///
    /// Comma-separated minute values (ASCII or fullwidth comma). Entries
    /// that fail to parse or are not positive are dropped. A single
    /// surviving number means "repeat every N minutes"; several numbers are
    /// literal offsets.
    pub fn parse_input(raw: &str) -> Vec<CheckInSpec> {
        let nums: Vec<f64> = raw
            .split([',', '\u{FF0C}'])
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite() && *n > 0.0)
            .collect();

        match nums.as_slice() {
            [] => Vec::new(),
            [single] => vec![CheckInSpec::RepeatEvery(*single)],
            many => many.iter().map(|n| CheckInSpec::Offset(*n)).collect(),
        }
    }

    fn interval_ms(minutes: f64) -> Option<u64> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return None;
        }
        let ms = (minutes * 60_000.0).round();
        if ms < 1.0 || ms > u64::MAX as f64 {
            return None;
        }
        Some(ms as u64)
    }
}

/// Canonical, fireable schedule with a monotonic cursor over fired offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInSchedule {
    /// Strictly increasing offsets, all below the block duration.
    offsets_ms: Vec<u64>,
    /// Index of the next unfired offset. Never decreases.
    #[serde(default)]
    next_index: usize,
}

impl CheckInSchedule {
    /// Build the canonical schedule for a block of `total_ms`.
    ///
    /// Repeat intervals expand to every multiple below the total; offsets
    /// at or past the total are discarded rather than rejected.
    pub fn normalize(total_ms: u64, specs: &[CheckInSpec]) -> Self {
        let mut offsets: Vec<u64> = Vec::new();
        for spec in specs {
            match *spec {
                CheckInSpec::Offset(minutes) => {
                    if let Some(ms) = CheckInSpec::interval_ms(minutes) {
                        if ms < total_ms {
                            offsets.push(ms);
                        }
                    }
                }
                CheckInSpec::RepeatEvery(minutes) => {
                    if let Some(step) = CheckInSpec::interval_ms(minutes) {
                        let mut t = step;
                        while t < total_ms {
                            offsets.push(t);
                            t = t.saturating_add(step);
                        }
                    }
                }
            }
        }
        offsets.sort_unstable();
        offsets.dedup();
        Self {
            offsets_ms: offsets,
            next_index: 0,
        }
    }

    pub fn offsets_ms(&self) -> &[u64] {
        &self.offsets_ms
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.offsets_ms.len()
    }

    /// Fire every not-yet-fired offset `<= elapsed_ms`, in ascending order.
    ///
    /// A long pause or coarse polling can carry `elapsed_ms` past several
    /// offsets at once; each still fires, in order. Re-calling with the same
    /// or a smaller elapsed value fires nothing.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<u64> {
        let mut fired = Vec::new();
        while self.next_index < self.offsets_ms.len()
            && elapsed_ms >= self.offsets_ms[self.next_index]
        {
            fired.push(self.offsets_ms[self.next_index]);
            self.next_index += 1;
        }
        fired
    }

    /// Milliseconds until the next unfired offset, `None` when exhausted.
    pub fn next_remaining_ms(&self, elapsed_ms: u64) -> Option<u64> {
        self.offsets_ms
            .get(self.next_index)
            .map(|offset| offset.saturating_sub(elapsed_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_multiple_numbers_are_offsets() {
        let specs = CheckInSpec::parse_input("5, 12");
        assert_eq!(
            specs,
            vec![CheckInSpec::Offset(5.0), CheckInSpec::Offset(12.0)]
        );
    }

    #[test]
    fn parse_input_single_number_is_repeat() {
        let specs = CheckInSpec::parse_input("5");
        assert_eq!(specs, vec![CheckInSpec::RepeatEvery(5.0)]);
    }

    #[test]
    fn parse_input_drops_garbage_and_nonpositive() {
        let specs = CheckInSpec::parse_input("abc, -3, 0, 7, 9");
        assert_eq!(
            specs,
            vec![CheckInSpec::Offset(7.0), CheckInSpec::Offset(9.0)]
        );
    }

    #[test]
    fn parse_input_fullwidth_comma() {
        let specs = CheckInSpec::parse_input("3\u{FF0C}8");
        assert_eq!(
            specs,
            vec![CheckInSpec::Offset(3.0), CheckInSpec::Offset(8.0)]
        );
    }

    #[test]
    fn parse_input_empty_is_empty() {
        assert!(CheckInSpec::parse_input("").is_empty());
        assert!(CheckInSpec::parse_input("nope").is_empty());
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        let specs = [
            CheckInSpec::Offset(12.0),
            CheckInSpec::Offset(5.0),
            CheckInSpec::Offset(5.0),
        ];
        let schedule = CheckInSchedule::normalize(20 * 60_000, &specs);
        assert_eq!(schedule.offsets_ms(), &[300_000, 720_000]);
    }

    #[test]
    fn normalize_discards_out_of_range() {
        let specs = [
            CheckInSpec::Offset(5.0),
            CheckInSpec::Offset(20.0),
            CheckInSpec::Offset(25.0),
        ];
        // Offsets at or past the total are dropped, not clamped.
        let schedule = CheckInSchedule::normalize(20 * 60_000, &specs);
        assert_eq!(schedule.offsets_ms(), &[300_000]);
    }

    #[test]
    fn normalize_expands_repeat_interval() {
        let specs = [CheckInSpec::RepeatEvery(5.0)];
        let schedule = CheckInSchedule::normalize(20 * 60_000, &specs);
        assert_eq!(schedule.offsets_ms(), &[300_000, 600_000, 900_000]);
    }

    #[test]
    fn normalize_fractional_minutes() {
        let specs = [CheckInSpec::Offset(2.5)];
        let schedule = CheckInSchedule::normalize(10 * 60_000, &specs);
        assert_eq!(schedule.offsets_ms(), &[150_000]);
    }

    #[test]
    fn normalize_rejects_nonfinite() {
        let specs = [
            CheckInSpec::Offset(f64::NAN),
            CheckInSpec::Offset(f64::INFINITY),
            CheckInSpec::RepeatEvery(-1.0),
        ];
        let schedule = CheckInSchedule::normalize(20 * 60_000, &specs);
        assert!(schedule.offsets_ms().is_empty());
        assert!(schedule.is_exhausted());
    }

    #[test]
    fn advance_fires_in_order_once() {
        let mut s = CheckInSchedule::normalize(60_000, &[CheckInSpec::RepeatEvery(0.25)]);
        assert_eq!(s.offsets_ms(), &[15_000, 30_000, 45_000]);

        assert_eq!(s.advance(14_999), Vec::<u64>::new());
        assert_eq!(s.advance(15_000), vec![15_000]);
        // Same elapsed value again: nothing re-fires.
        assert_eq!(s.advance(15_000), Vec::<u64>::new());
        // Smaller elapsed value: still nothing.
        assert_eq!(s.advance(1_000), Vec::<u64>::new());
    }

    #[test]
    fn advance_skip_ahead_fires_all_due() {
        let specs = [
            CheckInSpec::Offset(5.0 / 60.0),
            CheckInSpec::Offset(10.0 / 60.0),
            CheckInSpec::Offset(15.0 / 60.0),
        ];
        let mut s = CheckInSchedule::normalize(60_000, &specs);
        assert_eq!(s.offsets_ms(), &[5_000, 10_000, 15_000]);
        assert_eq!(s.advance(16_000), vec![5_000, 10_000, 15_000]);
        assert!(s.is_exhausted());
    }

    #[test]
    fn next_remaining_counts_down_then_none() {
        let mut s = CheckInSchedule::normalize(60_000, &[CheckInSpec::Offset(0.5)]);
        assert_eq!(s.next_remaining_ms(0), Some(30_000));
        assert_eq!(s.next_remaining_ms(12_000), Some(18_000));
        s.advance(30_000);
        assert_eq!(s.next_remaining_ms(31_000), None);
    }

    #[test]
    fn empty_schedule_never_fires() {
        let mut s = CheckInSchedule::normalize(60_000, &[]);
        assert!(s.is_exhausted());
        assert_eq!(s.advance(u64::MAX), Vec::<u64>::new());
        assert_eq!(s.next_remaining_ms(0), None);
    }
}
