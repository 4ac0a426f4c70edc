use super::{ConfigurationError, Granularity};
use std::ops::Range;

/// The number of half-hour intervals in a day
pub const HALF_HOURS_PER_DAY: usize = 48;

/// The two time granularities of the horizon and the mapping between them.
///
/// Half hours are indexed `0..H` and days `0..D`, with `H = 48 * D` enforced
/// on construction so that every half hour falls into exactly one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    half_hours: usize,
    days: usize,
}

impl TimeGrid {
    /// Relate `half_hours` half-hourly intervals to `days` daily intervals.
    pub fn new(half_hours: usize, days: usize) -> Result<Self, ConfigurationError> {
        if half_hours == 0 {
            return Err(ConfigurationError::EmptyHorizon);
        }
        if half_hours % HALF_HOURS_PER_DAY != 0 {
            return Err(ConfigurationError::PartialDay { half_hours });
        }

        let expected = half_hours / HALF_HOURS_PER_DAY;
        if days != expected {
            return Err(ConfigurationError::LengthMismatch {
                half_hours,
                days,
                expected,
            });
        }

        Ok(Self { half_hours, days })
    }

    /// The number of half-hour intervals, H
    pub fn half_hours(&self) -> usize {
        self.half_hours
    }

    /// The number of day intervals, D
    pub fn days(&self) -> usize {
        self.days
    }

    /// The number of intervals at the given granularity
    pub fn intervals(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::HalfHour => self.half_hours,
            Granularity::Day => self.days,
        }
    }

    /// The day containing half hour `t`
    pub fn day_of(&self, t: usize) -> usize {
        debug_assert!(t < self.half_hours, "half hour {t} is outside the horizon");
        t / HALF_HOURS_PER_DAY
    }

    /// The interval of `granularity` that half hour `t` falls into
    pub fn interval_of(&self, granularity: Granularity, t: usize) -> usize {
        match granularity {
            Granularity::HalfHour => t,
            Granularity::Day => self.day_of(t),
        }
    }

    /// The whole days attributed to a range of half hours.
    ///
    /// Both ends are floored to a day boundary, so a day straddling the end of
    /// the range is attributed to whichever range contains its last half hour.
    pub fn day_range(&self, half_hours: Range<usize>) -> Range<usize> {
        half_hours.start / HALF_HOURS_PER_DAY..half_hours.end / HALF_HOURS_PER_DAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of() {
        let grid = TimeGrid::new(96, 2).unwrap();
        assert_eq!(grid.day_of(0), 0);
        assert_eq!(grid.day_of(47), 0);
        assert_eq!(grid.day_of(48), 1);
        assert_eq!(grid.day_of(95), 1);
    }

    #[test]
    fn test_partial_day() {
        assert_eq!(
            TimeGrid::new(50, 1),
            Err(ConfigurationError::PartialDay { half_hours: 50 })
        );
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            TimeGrid::new(96, 3),
            Err(ConfigurationError::LengthMismatch {
                half_hours: 96,
                days: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(TimeGrid::new(0, 0), Err(ConfigurationError::EmptyHorizon));
    }

    #[test]
    fn test_day_range() {
        let grid = TimeGrid::new(144, 3).unwrap();
        assert_eq!(grid.day_range(0..48), 0..1);
        assert_eq!(grid.day_range(48..144), 1..3);
        // a range ending mid-day leaves that day to the next range
        assert_eq!(grid.day_range(0..70), 0..1);
        assert_eq!(grid.day_range(70..144), 1..3);
    }
}
