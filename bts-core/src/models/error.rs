use super::Market;
use time::{Date, OffsetDateTime};

/// The various ways in which the battery parameters or price series can be
/// unfit for building a model.
///
/// These are detected before any model construction; the solver never sees
/// a misaligned day mapping or a nonsensical battery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A rate or volume is zero, negative, or not finite
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive {
        /// The offending parameter
        field: &'static str,
        /// The value that was supplied
        value: f64,
    },

    /// An efficiency (loss fraction) lies outside [0, 1]
    #[error("{field} must lie within [0, 1], got {value}")]
    EfficiencyOutOfRange {
        /// The offending parameter
        field: &'static str,
        /// The value that was supplied
        value: f64,
    },

    /// There are no half-hourly rows at all
    #[error("the price series are empty")]
    EmptyHorizon,

    /// The half-hourly rows do not add up to whole days
    #[error("{half_hours} half-hourly rows do not form whole days of 48 intervals")]
    PartialDay {
        /// The number of half-hourly rows
        half_hours: usize,
    },

    /// The half-hourly and daily series cover a different number of days
    #[error("{half_hours} half-hourly rows require {expected} daily rows, got {days}")]
    LengthMismatch {
        /// The number of half-hourly rows
        half_hours: usize,
        /// The number of daily rows
        days: usize,
        /// The number of daily rows implied by the half-hourly series
        expected: usize,
    },

    /// A price is NaN or infinite
    #[error("price for {market} at index {index} is not finite: {value}")]
    NonFinitePrice {
        /// The market the price belongs to
        market: Market,
        /// The index into that market's series (half-hour or day)
        index: usize,
        /// The value that was supplied
        value: f64,
    },

    /// A timestamp does not come strictly after the one before it
    #[error("{series} row {index} at {time} does not follow {previous}")]
    NonChronological {
        /// Which series, "half_hourly" or "daily"
        series: &'static str,
        /// The offending row
        index: usize,
        /// Its timestamp
        time: OffsetDateTime,
        /// The timestamp of the preceding row
        previous: OffsetDateTime,
    },

    /// A daily row is dated differently from the first half hour of its day
    #[error("daily row {day} is dated {date}, but its first half hour falls on {expected}")]
    DayMisaligned {
        /// The offending day
        day: usize,
        /// The date of the daily row
        date: Date,
        /// The date of half hour `48 * day`
        expected: Date,
    },

    /// The requested terminal state of charge is negative or not finite
    #[error("terminal energy must be finite and non-negative, got {0}")]
    TerminalEnergy(f64),
}
