use super::Map;

/// The label of the final row of the profits table
pub const TOTAL_LABEL: &str = "Total";

/// The optimal profit, split across calendar years.
///
/// The yearly figures sum to `total` exactly: the last year is assigned
/// whatever the earlier years leave over.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalProfits {
    /// Profit per calendar year, in chronological order
    pub years: Map<i32, f64>,
    /// The optimal objective value reported by the solver
    pub total: f64,
}

impl OptimalProfits {
    /// The table rows: one per year, then the total
    pub fn rows(&self) -> impl Iterator<Item = ProfitRow> + '_ {
        self.years
            .iter()
            .map(|(year, profit)| ProfitRow {
                year: year.to_string(),
                profit: *profit,
            })
            .chain(std::iter::once(ProfitRow {
                year: TOTAL_LABEL.to_owned(),
                profit: self.total,
            }))
    }
}

/// A single row of the optimal profits table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfitRow {
    /// The calendar year, or [`TOTAL_LABEL`]
    #[cfg_attr(feature = "serde", serde(rename = "Year"))]
    pub year: String,
    /// The attributed profit, in currency units
    #[cfg_attr(feature = "serde", serde(rename = "Optimal Profit"))]
    pub profit: f64,
}
