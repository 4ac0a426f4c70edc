use super::{ConfigurationError, Granularity, HALF_HOURS_PER_DAY, Market, TimeGrid};
use time::OffsetDateTime;

/// One half-hourly row: the start of the interval and the prices quoted by
/// the two half-hourly markets, in currency per MWh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfHourPrices {
    /// The start of the half hour
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub time: OffsetDateTime,
    /// The Market 1 price
    pub market1: f64,
    /// The Market 2 price
    pub market2: f64,
}

/// One daily row: the start of the day and the Market 3 price, in currency
/// per MWh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyPrice {
    /// The start of the day
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub date: OffsetDateTime,
    /// The Market 3 price
    pub market3: f64,
}

/// The price series of all three markets, in chronological order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketPrices {
    /// Market 1 and Market 2, one row per half hour
    pub half_hourly: Vec<HalfHourPrices>,
    /// Market 3, one row per day
    pub daily: Vec<DailyPrice>,
}

impl MarketPrices {
    /// The price of `market` in its `index`-th interval (a half hour for
    /// Markets 1 and 2, a day for Market 3).
    ///
    /// # Panics
    ///
    /// If `index` is outside the market's series.
    pub fn price(&self, market: Market, index: usize) -> f64 {
        match market {
            Market::Market1 => self.half_hourly[index].market1,
            Market::Market2 => self.half_hourly[index].market2,
            Market::Market3 => self.daily[index].market3,
        }
    }

    /// The number of intervals quoted by `market`
    pub fn len(&self, market: Market) -> usize {
        match market.granularity() {
            Granularity::HalfHour => self.half_hourly.len(),
            Granularity::Day => self.daily.len(),
        }
    }

    /// The half-hourly timestamps
    pub fn times(&self) -> impl ExactSizeIterator<Item = OffsetDateTime> + '_ {
        self.half_hourly.iter().map(|row| row.time)
    }

    /// Check that every price is finite and that the two granularities line
    /// up, returning the derived time grid.
    pub fn validate(&self) -> Result<TimeGrid, ConfigurationError> {
        let grid = TimeGrid::new(self.half_hourly.len(), self.daily.len())?;

        chronological("half_hourly", self.half_hourly.iter().map(|row| row.time))?;
        chronological("daily", self.daily.iter().map(|row| row.date))?;

        // Market 3 positions are mapped onto half hours by index alone, so the
        // dates have to agree for that mapping to mean anything.
        for (day, row) in self.daily.iter().enumerate() {
            let first = self.half_hourly[day * HALF_HOURS_PER_DAY].time;
            let date = row.date.to_offset(first.offset()).date();
            if date != first.date() {
                return Err(ConfigurationError::DayMisaligned {
                    day,
                    date,
                    expected: first.date(),
                });
            }
        }

        for market in Market::ALL {
            for index in 0..self.len(market) {
                let value = self.price(market, index);
                if !value.is_finite() {
                    return Err(ConfigurationError::NonFinitePrice {
                        market,
                        index,
                        value,
                    });
                }
            }
        }

        Ok(grid)
    }
}

fn chronological(
    series: &'static str,
    times: impl Iterator<Item = OffsetDateTime>,
) -> Result<(), ConfigurationError> {
    let mut times = times.enumerate();
    let Some((_, mut previous)) = times.next() else {
        return Ok(());
    };
    for (index, time) in times {
        if time <= previous {
            return Err(ConfigurationError::NonChronological {
                series,
                index,
                time,
                previous,
            });
        }
        previous = time;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{
        Duration,
        macros::{date, datetime},
    };

    fn prices(days: usize) -> MarketPrices {
        let start = datetime!(2018-01-01 00:00 UTC);
        MarketPrices {
            half_hourly: (0..days * 48)
                .map(|t| HalfHourPrices {
                    time: start + Duration::minutes(30 * t as i64),
                    market1: t as f64,
                    market2: 2.0 * t as f64,
                })
                .collect(),
            daily: (0..days)
                .map(|d| DailyPrice {
                    date: start + Duration::days(d as i64),
                    market3: 100.0 + d as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn test_price_accessor() {
        let prices = prices(2);
        assert_eq!(prices.price(Market::Market1, 5), 5.0);
        assert_eq!(prices.price(Market::Market2, 5), 10.0);
        assert_eq!(prices.price(Market::Market3, 1), 101.0);
        assert_eq!(prices.len(Market::Market3), 2);
    }

    #[test]
    fn test_validate() {
        let grid = prices(2).validate().unwrap();
        assert_eq!(grid.half_hours(), 96);
        assert_eq!(grid.days(), 2);
    }

    #[test]
    fn test_non_finite() {
        let mut prices = prices(1);
        prices.half_hourly[7].market2 = f64::INFINITY;
        assert_eq!(
            prices.validate(),
            Err(ConfigurationError::NonFinitePrice {
                market: Market::Market2,
                index: 7,
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_missing_day() {
        let mut prices = prices(2);
        prices.daily.pop();
        assert!(matches!(
            prices.validate(),
            Err(ConfigurationError::LengthMismatch { days: 1, .. })
        ));
    }

    #[test]
    fn test_swapped_rows() {
        let mut prices = prices(2);
        prices.half_hourly.swap(10, 60);
        assert_eq!(
            prices.validate(),
            Err(ConfigurationError::NonChronological {
                series: "half_hourly",
                index: 11,
                time: datetime!(2018-01-01 05:30 UTC),
                previous: datetime!(2018-01-02 06:00 UTC),
            })
        );
    }

    #[test]
    fn test_repeated_day() {
        let mut prices = prices(2);
        prices.daily[1].date = prices.daily[0].date;
        assert!(matches!(
            prices.validate(),
            Err(ConfigurationError::NonChronological {
                series: "daily",
                index: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_daily_series_a_day_late() {
        let mut prices = prices(2);
        for row in prices.daily.iter_mut() {
            row.date += Duration::days(1);
        }
        assert_eq!(
            prices.validate(),
            Err(ConfigurationError::DayMisaligned {
                day: 0,
                date: date!(2018-01-02),
                expected: date!(2018-01-01),
            })
        );
    }

    #[test]
    fn test_daily_dates_compare_in_half_hour_offset() {
        // midnight in UTC+1 is still the previous evening in UTC
        let mut prices = prices(1);
        prices.daily[0].date = datetime!(2018-01-01 00:00 +1);
        assert!(prices.validate().is_err());

        prices.daily[0].date = datetime!(2018-01-01 23:00 -1);
        assert!(prices.validate().is_err());

        prices.daily[0].date = datetime!(2018-01-01 12:00 +2);
        assert!(prices.validate().is_ok());
    }

    #[test]
    fn test_deserialize() {
        let raw = r#"{
            "half_hourly": [
                { "time": "2018-01-01T00:00:00Z", "market1": 40.5, "market2": 38.0 }
            ],
            "daily": [
                { "date": "2018-01-01T00:00:00Z", "market3": 41.0 }
            ]
        }"#;

        let test = serde_json::from_str::<MarketPrices>(raw).unwrap();
        assert_eq!(test.half_hourly[0].time, datetime!(2018-01-01 00:00 UTC));
        assert_eq!(test.price(Market::Market3, 0), 41.0);
    }
}
