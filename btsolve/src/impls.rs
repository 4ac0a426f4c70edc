//! JSON implementations of the market-data and report ports.

use bts_core::{
    models::{BatteryParameters, MarketPrices, OptimalDecisions, OptimalProfits},
    ports::{MarketData, ReportSink},
};
use bts_solver::io::ReportDto;
use serde::Deserialize as _;
use std::{convert::Infallible, io::Read, io::Write};

/// Market data held in a single JSON document with `battery` and `prices`
/// sections.
///
/// The document is parsed up front; each section is only interpreted when
/// asked for, so errors name the section that is malformed.
pub struct JsonInput(serde_json::Value);

impl JsonInput {
    /// Parse a document from `reader`
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader).map(Self)
    }
}

impl MarketData for JsonInput {
    type Error = serde_json::Error;

    fn battery(&self) -> Result<BatteryParameters, Self::Error> {
        BatteryParameters::deserialize(&self.0["battery"])
    }

    fn prices(&self) -> Result<MarketPrices, Self::Error> {
        MarketPrices::deserialize(&self.0["prices"])
    }
}

/// Collects the result tables and writes them as one JSON document.
#[derive(Default)]
pub struct JsonReport(ReportDto);

impl JsonReport {
    /// Write the collected document to `writer`
    pub fn finish(self, writer: impl Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, &self.0)
    }
}

impl ReportSink for JsonReport {
    type Error = Infallible;

    fn write_status(&mut self, status: &str) -> Result<(), Self::Error> {
        self.0.status = status.to_owned();
        Ok(())
    }

    fn write_decisions(&mut self, decisions: &OptimalDecisions) -> Result<(), Self::Error> {
        self.0.set_decisions(decisions);
        Ok(())
    }

    fn write_profits(&mut self, profits: &OptimalProfits) -> Result<(), Self::Error> {
        self.0.set_profits(profits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bts_core::{models::ConfigurationError, ports::LoadError};
    use time::macros::datetime;

    fn document(days: usize) -> String {
        let half_hourly = (0..days * 48)
            .map(|t| {
                let time = datetime!(2018-12-31 00:00 UTC) + time::Duration::minutes(30 * t as i64);
                serde_json::json!({
                    "time": time.format(&time::format_description::well_known::Rfc3339).unwrap(),
                    "market1": 40.0 + (t % 7) as f64,
                    "market2": 45.0 - (t % 5) as f64,
                })
            })
            .collect::<Vec<_>>();
        let daily = (0..days)
            .map(|d| {
                let date = datetime!(2018-12-31 00:00 UTC) + time::Duration::days(d as i64);
                serde_json::json!({
                    "date": date.format(&time::format_description::well_known::Rfc3339).unwrap(),
                    "market3": 42.0,
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({
            "battery": {
                "max_charge_rate": 2.0,
                "max_discharge_rate": 2.0,
                "max_storage_volume": 4.0,
                "charge_efficiency": 0.05,
                "discharge_efficiency": 0.05
            },
            "prices": { "half_hourly": half_hourly, "daily": daily }
        })
        .to_string()
    }

    #[test]
    fn test_input() {
        let input = JsonInput::from_reader(document(2).as_bytes()).unwrap();
        let problem = input.problem().unwrap();
        assert_eq!(problem.grid().half_hours(), 96);
        assert_eq!(problem.grid().days(), 2);
        assert_eq!(problem.prices().daily[1].date, datetime!(2019-01-01 00:00 UTC));
    }

    #[test]
    fn test_input_errors() {
        let input = JsonInput::from_reader(r#"{ "prices": {} }"#.as_bytes()).unwrap();
        assert!(matches!(input.problem(), Err(LoadError::Source(_))));

        let mut value: serde_json::Value = serde_json::from_str(&document(1)).unwrap();
        value["prices"]["daily"] = serde_json::json!([]);
        let input = JsonInput(value);
        assert!(matches!(
            input.problem(),
            Err(LoadError::Configuration(
                ConfigurationError::LengthMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_report() {
        let mut report = JsonReport::default();
        report.write_status("Infeasible").unwrap();

        let mut buffer = Vec::new();
        report.finish(&mut buffer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(json["Optimization Status"], "Infeasible");
        assert!(json["Optimal Profit"].is_null());
    }
}
