use crate::{Solution, VariableHandles, lp::Column};
use bts_core::models::{HALF_HOURS_PER_DAY, Market, OptimalDecisions, Problem};
use std::ops::Range;

/// Copy the solved values into half-hourly tables.
///
/// Markets 1 and 2 are read directly. Market 3 is read per day and repeated
/// across the 48 half hours of that day, using the same half-hour-to-day
/// mapping as the model. The returned tables own their data, so the model
/// and solution can be dropped afterwards.
pub fn extract(
    problem: &Problem,
    handles: &VariableHandles,
    solution: &Solution,
) -> OptimalDecisions {
    let grid = problem.grid();

    let expand = |columns: &[Column], market: Market| {
        (0..grid.half_hours())
            .map(|t| solution.value(columns[grid.interval_of(market.granularity(), t)]))
            .collect::<Vec<_>>()
    };

    OptimalDecisions {
        time: problem.prices().times().collect(),
        discharge: Market::ALL.map(|market| expand(handles.export(market), market)),
        charge: Market::ALL.map(|market| expand(handles.import(market), market)),
        energy: handles
            .energy()
            .iter()
            .map(|&column| solution.value(column))
            .collect(),
    }
}

/// The profit earned over a range of half hours, by summing the same
/// per-interval terms as the objective.
///
/// Markets 1 and 2 contribute every half hour in `half_hours`; Market 3
/// contributes every whole day in [`TimeGrid::day_range`] of that range.
///
/// [`TimeGrid::day_range`]: bts_core::models::TimeGrid::day_range
pub fn profit_over(
    problem: &Problem,
    decisions: &OptimalDecisions,
    half_hours: Range<usize>,
) -> f64 {
    let grid = problem.grid();
    let prices = problem.prices();
    let loss = problem.battery().discharge_efficiency;

    let interval = |market: Market, index: usize, t: usize| {
        market.revenue(
            prices.price(market, index),
            decisions.discharge(market)[t],
            decisions.charge(market)[t],
            loss,
        )
    };

    let half_hourly = half_hours
        .clone()
        .map(|t| interval(Market::Market1, t, t) + interval(Market::Market2, t, t))
        .sum::<f64>();

    // The daily decision is the same in each of the day's half hours, so
    // reading it from the first one is enough.
    let daily = grid
        .day_range(half_hours)
        .map(|d| interval(Market::Market3, d, d * HALF_HOURS_PER_DAY))
        .sum::<f64>();

    half_hourly + daily
}
