use bts_core::models::{DecisionRow, OptimalDecisions, OptimalProfits, ProfitRow};
use serde::{Deserialize, Serialize};

/// a representation of the outcome of a solve.
///
/// Only the status is filled in when the solve was not optimal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDto {
    /// the solver status, e.g. "Optimal"
    #[serde(rename = "Optimization Status")]
    pub status: String,
    /// the optimal profit
    #[serde(rename = "Optimal Profit", default)]
    pub profit: Option<f64>,
    /// the optimal decisions table
    #[serde(rename = "Optimal Decisions", default)]
    pub decisions: Vec<DecisionRow>,
    /// the stored energy at each half-hour boundary, in MWh
    #[serde(rename = "Energy Stored (MWh)", default)]
    pub energy: Vec<f64>,
    /// the optimal profits table
    #[serde(rename = "Optimal Profits", default)]
    pub profits: Vec<ProfitRow>,
}

impl ReportDto {
    /// fill in the decisions table and the stored energy
    pub fn set_decisions(&mut self, decisions: &OptimalDecisions) {
        self.decisions = decisions.rows().collect();
        self.energy = decisions.energy.clone();
    }

    /// fill in the profits table and the overall profit
    pub fn set_profits(&mut self, profits: &OptimalProfits) {
        self.profits = profits.rows().collect();
        self.profit = Some(profits.total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    #[test]
    fn test_status_only() {
        let report = ReportDto {
            status: Status::NotSolved.to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["Optimization Status"], "Not Solved");
        assert!(json["Optimal Profit"].is_null());
        assert_eq!(json["Optimal Decisions"], serde_json::json!([]));
    }

    #[test]
    fn test_profits() {
        let mut report = ReportDto::default();
        report.set_profits(&OptimalProfits {
            years: [(2018, 1.0), (2019, 2.0)].into_iter().collect(),
            total: 3.0,
        });

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["Optimal Profit"], 3.0);
        assert_eq!(
            json["Optimal Profits"],
            serde_json::json!([
                { "Year": "2018", "Optimal Profit": 1.0 },
                { "Year": "2019", "Optimal Profit": 2.0 },
                { "Year": "Total", "Optimal Profit": 3.0 },
            ])
        );
    }
}
