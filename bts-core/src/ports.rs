use crate::models::{
    BatteryParameters, ConfigurationError, MarketPrices, OptimalDecisions, OptimalProfits, Problem,
};

/// A provider of the battery specification and the market price series.
///
/// Implementations own the file format (spreadsheets, JSON, a database);
/// the solver only ever sees the validated [`Problem`].
pub trait MarketData {
    /// Error type for read failures
    type Error: std::error::Error + 'static;

    /// Read the battery parameters
    fn battery(&self) -> Result<BatteryParameters, Self::Error>;

    /// Read the half-hourly and daily price series
    fn prices(&self) -> Result<MarketPrices, Self::Error>;

    /// Read both inputs and validate them together.
    fn problem(&self) -> Result<Problem, LoadError<Self::Error>> {
        let battery = self.battery().map_err(LoadError::Source)?;
        let prices = self.prices().map_err(LoadError::Source)?;
        Ok(Problem::new(battery, prices)?)
    }
}

/// A consumer of the result tables.
///
/// The status is always written; the tables are only written when the solve
/// reached optimality.
pub trait ReportSink {
    /// Error type for write failures
    type Error: std::error::Error + 'static;

    /// Record the solver status, e.g. "Optimal" or "Infeasible"
    fn write_status(&mut self, status: &str) -> Result<(), Self::Error>;

    /// Record the optimal decisions table
    fn write_decisions(&mut self, decisions: &OptimalDecisions) -> Result<(), Self::Error>;

    /// Record the optimal profits table
    fn write_profits(&mut self, profits: &OptimalProfits) -> Result<(), Self::Error>;
}

/// Errors that can occur while loading a [`Problem`] from a [`MarketData`]
#[derive(Debug, thiserror::Error)]
pub enum LoadError<E: std::error::Error + 'static> {
    /// The provider failed to read its source
    #[error("failed to read market data: {0}")]
    Source(#[source] E),
    /// The data was read but is not a valid problem
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}
