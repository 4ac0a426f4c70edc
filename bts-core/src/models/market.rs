use std::fmt;

/// The markets the battery can trade in.
///
/// Market 1 and Market 2 quote half-hourly prices; Market 3 quotes a single
/// daily price, and a Market 3 position is held constant for the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Market {
    /// Half-hourly market 1
    Market1,
    /// Half-hourly market 2
    Market2,
    /// Daily market 3
    Market3,
}

/// The time resolution at which a market quotes prices and holds positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// 30 minute intervals
    HalfHour,
    /// 24 hour intervals, spanning 48 half hours
    Day,
}

impl Granularity {
    /// The length of one interval in hours, i.e. the factor converting a
    /// constant power (MW) held over the interval into energy (MWh).
    pub const fn hours(self) -> f64 {
        match self {
            Self::HalfHour => 0.5,
            Self::Day => 24.0,
        }
    }
}

impl Market {
    /// Every market, in column order.
    pub const ALL: [Market; 3] = [Market::Market1, Market::Market2, Market::Market3];

    /// The position of this market in [`Market::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Market1 => 0,
            Self::Market2 => 1,
            Self::Market3 => 2,
        }
    }

    /// The resolution this market trades at
    pub const fn granularity(self) -> Granularity {
        match self {
            Self::Market1 | Self::Market2 => Granularity::HalfHour,
            Self::Market3 => Granularity::Day,
        }
    }

    /// The profit earned in one interval of this market.
    ///
    /// Exported energy is paid for after the discharge loss is taken off;
    /// imported energy is paid in full. The charge loss only shows up in the
    /// state of charge, never here.
    pub fn revenue(self, price: f64, export: f64, import: f64, discharge_efficiency: f64) -> f64 {
        price * self.granularity().hours() * (export * (1.0 - discharge_efficiency) - import)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Market {}", self.index() + 1)
    }
}
