mod battery;
mod decisions;
mod error;
mod grid;
mod map;
mod market;
mod prices;
mod problem;
mod profits;

pub use battery::BatteryParameters;
pub use decisions::{DecisionRow, OptimalDecisions};
pub use error::ConfigurationError;
pub use grid::{HALF_HOURS_PER_DAY, TimeGrid};
pub use map::Map;
pub use market::{Granularity, Market};
pub use prices::{DailyPrice, HalfHourPrices, MarketPrices};
pub use problem::Problem;
pub use profits::{OptimalProfits, ProfitRow, TOTAL_LABEL};
