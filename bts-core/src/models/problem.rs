use super::{BatteryParameters, ConfigurationError, MarketPrices, TimeGrid};

/// Battery parameters and market prices that have passed validation, together
/// with the time grid derived from them.
///
/// Constructing a `Problem` is the only way to obtain a [`TimeGrid`] tied to a
/// price series, so downstream stages can rely on `H = 48 * D`.
#[derive(Debug, Clone)]
pub struct Problem {
    battery: BatteryParameters,
    prices: MarketPrices,
    grid: TimeGrid,
}

impl Problem {
    /// Validate the inputs and derive the time grid.
    pub fn new(
        battery: BatteryParameters,
        prices: MarketPrices,
    ) -> Result<Self, ConfigurationError> {
        battery.validate()?;
        let grid = prices.validate()?;
        Ok(Self {
            battery,
            prices,
            grid,
        })
    }

    /// The battery
    pub fn battery(&self) -> &BatteryParameters {
        &self.battery
    }

    /// The price series
    pub fn prices(&self) -> &MarketPrices {
        &self.prices
    }

    /// The time grid
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }
}
