use super::Market;
use time::OffsetDateTime;

/// The optimal schedule at half-hour resolution.
///
/// Every series has one entry per half hour, including Market 3, whose daily
/// decision is repeated across the 48 half hours of its day. The state of
/// charge has one more entry than there are half hours: `energy[t]` is the
/// stored energy at the start of half hour `t`, and the last entry is the
/// terminal level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimalDecisions {
    /// The start of each half hour
    pub time: Vec<OffsetDateTime>,
    /// Export power per market, in MW, indexed by [`Market::index`]
    pub discharge: [Vec<f64>; 3],
    /// Import power per market, in MW, indexed by [`Market::index`]
    pub charge: [Vec<f64>; 3],
    /// Stored energy at the start of each half hour, in MWh
    pub energy: Vec<f64>,
}

impl OptimalDecisions {
    /// The number of half hours
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the schedule covers no half hours
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Export power to `market` per half hour
    pub fn discharge(&self, market: Market) -> &[f64] {
        &self.discharge[market.index()]
    }

    /// Import power from `market` per half hour
    pub fn charge(&self, market: Market) -> &[f64] {
        &self.charge[market.index()]
    }

    /// Total import power over all markets in half hour `t`
    pub fn total_charge(&self, t: usize) -> f64 {
        self.charge.iter().map(|series| series[t]).sum()
    }

    /// Total export power over all markets in half hour `t`
    pub fn total_discharge(&self, t: usize) -> f64 {
        self.discharge.iter().map(|series| series[t]).sum()
    }

    /// The table rows, one per half hour
    pub fn rows(&self) -> impl ExactSizeIterator<Item = DecisionRow> + '_ {
        (0..self.len()).map(|t| DecisionRow {
            time: self.time[t],
            discharge_market1: self.discharge[0][t],
            discharge_market2: self.discharge[1][t],
            discharge_market3: self.discharge[2][t],
            charge_market1: self.charge[0][t],
            charge_market2: self.charge[1][t],
            charge_market3: self.charge[2][t],
        })
    }
}

/// A single row of the optimal decisions table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionRow {
    /// The start of the half hour
    #[cfg_attr(
        feature = "serde",
        serde(rename = "Time", with = "time::serde::rfc3339")
    )]
    pub time: OffsetDateTime,
    /// MW exported to Market 1
    #[cfg_attr(feature = "serde", serde(rename = "Discharge to Market 1 (MW)"))]
    pub discharge_market1: f64,
    /// MW exported to Market 2
    #[cfg_attr(feature = "serde", serde(rename = "Discharge to Market 2 (MW)"))]
    pub discharge_market2: f64,
    /// MW exported to Market 3
    #[cfg_attr(feature = "serde", serde(rename = "Discharge to Market 3 (MW)"))]
    pub discharge_market3: f64,
    /// MW imported from Market 1
    #[cfg_attr(feature = "serde", serde(rename = "Charge from Market 1 (MW)"))]
    pub charge_market1: f64,
    /// MW imported from Market 2
    #[cfg_attr(feature = "serde", serde(rename = "Charge from Market 2 (MW)"))]
    pub charge_market2: f64,
    /// MW imported from Market 3
    #[cfg_attr(feature = "serde", serde(rename = "Charge from Market 3 (MW)"))]
    pub charge_market3: f64,
}
