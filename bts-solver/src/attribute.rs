use crate::profit_over;
use bts_core::models::{Map, OptimalDecisions, OptimalProfits, Problem};
use std::ops::Range;
use time::OffsetDateTime;
use tracing::{Level, event, instrument};

/// Errors that can occur when splitting profit across years
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttributionError {
    /// A timestamp belongs to an earlier year than the row before it
    #[error("half hour {index} falls in {year}, after rows from {previous}")]
    NonChronological {
        /// The offending row
        index: usize,
        /// Its calendar year
        year: i32,
        /// The year of the preceding row
        previous: i32,
    },

    /// The decisions do not cover the problem's horizon
    #[error("decisions cover {decisions} half hours, but the horizon has {half_hours}")]
    LengthMismatch {
        /// Half hours in the decisions table
        decisions: usize,
        /// Half hours in the problem
        half_hours: usize,
    },
}

/// Group consecutive half-hour rows by calendar year.
///
/// The rows must be in chronological order, so each year occupies one
/// contiguous range of indices. A validated [`Problem`] already guarantees
/// this; the check here covers timestamps from anywhere else.
pub fn year_ranges(
    times: impl IntoIterator<Item = OffsetDateTime>,
) -> Result<Vec<(i32, Range<usize>)>, AttributionError> {
    let mut ranges: Vec<(i32, Range<usize>)> = Vec::new();

    for (index, time) in times.into_iter().enumerate() {
        let year = time.year();
        match ranges.last_mut() {
            Some((previous, range)) if *previous == year => range.end = index + 1,
            Some((previous, _)) if *previous > year => {
                return Err(AttributionError::NonChronological {
                    index,
                    year,
                    previous: *previous,
                });
            }
            _ => ranges.push((year, index..index + 1)),
        }
    }

    Ok(ranges)
}

/// Split the optimal profit `total` into calendar years.
///
/// Every year but the last is re-summed from the per-interval profit terms
/// over its half hours and the whole days they contain. The last year gets
/// `total` minus the earlier years, so the years add back up to `total` even
/// when a year boundary falls in the middle of a day.
#[instrument(skip_all, fields(total = total))]
pub fn attribute(
    problem: &Problem,
    decisions: &OptimalDecisions,
    total: f64,
) -> Result<OptimalProfits, AttributionError> {
    let half_hours = problem.grid().half_hours();
    if decisions.len() != half_hours {
        return Err(AttributionError::LengthMismatch {
            decisions: decisions.len(),
            half_hours,
        });
    }

    let ranges = year_ranges(problem.prices().times())?;

    let mut years = Map::default();
    if let Some(((last, _), earlier)) = ranges.split_last() {
        let mut attributed = 0.0;
        for (year, range) in earlier {
            let profit = profit_over(problem, decisions, range.clone());
            event!(Level::DEBUG, year, rows = range.len(), profit);
            attributed += profit;
            years.insert(*year, profit);
        }
        years.insert(*last, total - attributed);
    }

    Ok(OptimalProfits { years, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::datetime};

    #[test]
    fn test_year_ranges() {
        let start = datetime!(2018-12-31 23:00 UTC);
        let times = (0..5).map(|t| start + Duration::minutes(30 * t));
        let ranges = year_ranges(times).unwrap();
        assert_eq!(ranges, vec![(2018, 0..2), (2019, 2..5)]);
    }

    #[test]
    fn test_year_ranges_out_of_order() {
        let times = [
            datetime!(2019-01-01 00:00 UTC),
            datetime!(2018-12-31 23:30 UTC),
        ];
        assert_eq!(
            year_ranges(times),
            Err(AttributionError::NonChronological {
                index: 1,
                year: 2018,
                previous: 2019
            })
        );
    }

    #[test]
    fn test_year_ranges_empty() {
        assert!(year_ranges(std::iter::empty()).unwrap().is_empty());
    }
}
