#![allow(dead_code)]
// Shared builders for the integration tests.

use bts_core::models::{BatteryParameters, DailyPrice, HalfHourPrices, MarketPrices, Problem};
use time::{Duration, OffsetDateTime};

pub fn battery(rate: f64, volume: f64, charge_loss: f64, discharge_loss: f64) -> BatteryParameters {
    BatteryParameters {
        max_charge_rate: rate,
        max_discharge_rate: rate,
        max_storage_volume: volume,
        charge_efficiency: charge_loss,
        discharge_efficiency: discharge_loss,
    }
}

/// Half-hourly and daily rows starting at `start`, with prices given per
/// half-hour (or day) index.
pub fn prices(
    start: OffsetDateTime,
    days: usize,
    market1: impl Fn(usize) -> f64,
    market2: impl Fn(usize) -> f64,
    market3: impl Fn(usize) -> f64,
) -> MarketPrices {
    MarketPrices {
        half_hourly: (0..days * 48)
            .map(|t| HalfHourPrices {
                time: start + Duration::minutes(30 * t as i64),
                market1: market1(t),
                market2: market2(t),
            })
            .collect(),
        daily: (0..days)
            .map(|d| DailyPrice {
                date: start + Duration::days(d as i64),
                market3: market3(d),
            })
            .collect(),
    }
}

/// A deterministic, bumpy price curve with a daily shape and some noise
pub fn wiggly(seed: u64) -> impl Fn(usize) -> f64 {
    move |t| {
        let hour = (t % 48) as f64 / 2.0;
        let daily = 50.0 + 25.0 * (std::f64::consts::TAU * (hour - 6.0) / 24.0).sin();
        // a small linear congruential generator keyed on (seed, t)
        let mut x = seed.wrapping_mul(6364136223846793005).wrapping_add(t as u64);
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let noise = (x >> 40) as f64 / (1u64 << 24) as f64;
        daily + 20.0 * (noise - 0.5)
    }
}

pub fn problem(battery: BatteryParameters, prices: MarketPrices) -> Problem {
    Problem::new(battery, prices).expect("valid test problem")
}
