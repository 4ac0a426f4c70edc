use bts_core::{
    models::{
        BatteryParameters, ConfigurationError, MarketPrices, OptimalDecisions, OptimalProfits,
    },
    ports::{LoadError, MarketData, ReportSink},
};
use bts_solver::{ModelOptions, clarabel::ClarabelSolver, optimize};
use rstest::*;
use std::convert::Infallible;
use time::macros::datetime;

mod problems;
use problems::{battery, prices, wiggly};

#[derive(Debug, thiserror::Error)]
#[error("sheet {0} is missing")]
struct MissingSheet(&'static str);

/// Inputs held in memory, optionally with a sheet missing
struct InMemory {
    battery: Option<BatteryParameters>,
    prices: MarketPrices,
}

impl MarketData for InMemory {
    type Error = MissingSheet;

    fn battery(&self) -> Result<BatteryParameters, Self::Error> {
        self.battery.clone().ok_or(MissingSheet("Battery Parameters"))
    }

    fn prices(&self) -> Result<MarketPrices, Self::Error> {
        Ok(self.prices.clone())
    }
}

/// Everything written, in order
#[derive(Default)]
struct Recorder {
    status: Vec<String>,
    decisions: Option<OptimalDecisions>,
    profits: Option<OptimalProfits>,
}

impl ReportSink for Recorder {
    type Error = Infallible;

    fn write_status(&mut self, status: &str) -> Result<(), Self::Error> {
        self.status.push(status.to_owned());
        Ok(())
    }

    fn write_decisions(&mut self, decisions: &OptimalDecisions) -> Result<(), Self::Error> {
        self.decisions = Some(decisions.clone());
        Ok(())
    }

    fn write_profits(&mut self, profits: &OptimalProfits) -> Result<(), Self::Error> {
        self.profits = Some(profits.clone());
        Ok(())
    }
}

#[fixture]
fn source() -> InMemory {
    InMemory {
        battery: Some(battery(2.0, 4.0, 0.05, 0.05)),
        prices: prices(
            datetime!(2020-12-31 00:00 UTC),
            2,
            wiggly(7),
            wiggly(8),
            |_| 45.0,
        ),
    }
}

#[rstest]
fn load_solve_and_report(source: InMemory) {
    let problem = source.problem().unwrap();
    let report = optimize(&problem, &ModelOptions::default(), &ClarabelSolver::default()).unwrap();

    let mut sink = Recorder::default();
    sink.write_status(&report.status.to_string()).unwrap();
    sink.write_decisions(&report.decisions).unwrap();
    sink.write_profits(&report.profits).unwrap();

    assert_eq!(sink.status, vec!["Optimal"]);

    let decisions = sink.decisions.unwrap();
    assert_eq!(decisions.len(), 96);
    assert_eq!(decisions.rows().count(), 96);
    assert_eq!(decisions.time[48], datetime!(2021-01-01 00:00 UTC));

    let profits = sink.profits.unwrap();
    assert_eq!(profits.years.keys().copied().collect::<Vec<_>>(), vec![2020, 2021]);
    assert_eq!(profits.total, report.objective);
}

#[rstest]
fn missing_sheet_is_a_source_error(mut source: InMemory) {
    source.battery = None;
    let err = source.problem().unwrap_err();
    assert!(matches!(err, LoadError::Source(MissingSheet(_))));
    assert_eq!(
        err.to_string(),
        "failed to read market data: sheet Battery Parameters is missing"
    );
}

#[rstest]
fn invalid_battery_is_a_configuration_error(mut source: InMemory) {
    source.battery = Some(battery(2.0, 0.0, 0.05, 0.05));
    let err = source.problem().unwrap_err();
    assert!(matches!(
        err,
        LoadError::Configuration(ConfigurationError::NotPositive {
            field: "max_storage_volume",
            ..
        })
    ));
}

#[rstest]
fn misaligned_daily_prices_are_rejected(mut source: InMemory) {
    source.prices.daily.pop();
    let err = source.problem().unwrap_err();
    assert!(matches!(
        err,
        LoadError::Configuration(ConfigurationError::LengthMismatch { .. })
    ));
}
