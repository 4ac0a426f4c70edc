use crate::lp::{Column, LinearProgram, Sense};
use bts_core::models::{ConfigurationError, Market, Problem};
use tracing::{Level, event, instrument};

/// Optional boundary conditions on top of the base formulation.
///
/// The battery always starts empty. By default the terminal level is free
/// (within the storage cap).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelOptions {
    /// Fix the stored energy at the end of the horizon, in MWh
    #[cfg_attr(feature = "serde", serde(default))]
    pub terminal_energy: Option<f64>,
}

/// The columns of the program, grouped by variable family.
///
/// Each family is a fixed-size vector at its market's native granularity:
/// length H for Markets 1 and 2, length D for Market 3, and H + 1 for the
/// stored energy.
#[derive(Debug, Clone)]
pub struct VariableHandles {
    export: [Vec<Column>; 3],
    import: [Vec<Column>; 3],
    energy: Vec<Column>,
}

impl VariableHandles {
    /// Export power to `market`, one column per native interval
    pub fn export(&self, market: Market) -> &[Column] {
        &self.export[market.index()]
    }

    /// Import power from `market`, one column per native interval
    pub fn import(&self, market: Market) -> &[Column] {
        &self.import[market.index()]
    }

    /// Stored energy at the start of each half hour, plus the terminal level
    pub fn energy(&self) -> &[Column] {
        &self.energy
    }
}

/// A battery trading problem expressed as a linear program
#[derive(Debug, Clone)]
pub struct BatteryModel {
    program: LinearProgram,
    handles: VariableHandles,
}

impl BatteryModel {
    /// Translate a validated problem into a linear program.
    ///
    /// Variables: for each market and native interval, an export power in
    /// `[0, max_discharge_rate]` and an import power in `[0, max_charge_rate]`;
    /// for each half-hour boundary `0..=H`, a stored energy in
    /// `[0, max_storage_volume]`.
    ///
    /// Objective: the sum of [`Market::revenue`] over every interval of every
    /// market.
    ///
    /// Constraints, for every half hour `t` with day `d = t / 48`:
    /// * `E[t+1] = E[t] + 0.5 * ((P1_in[t] + P2_in[t] + P3_in[d]) * (1 - charge_efficiency)
    ///   - (P1_out[t] + P2_out[t] + P3_out[d]))`
    /// * `P1_in[t] + P2_in[t] + P3_in[d] <= max_charge_rate`
    /// * `P1_out[t] + P2_out[t] + P3_out[d] <= max_discharge_rate`
    ///
    /// plus `E[0] = 0` and, if requested, a fixed `E[H]`. The storage cap on
    /// `E[t+1]` is carried by the bounds of the energy columns.
    #[instrument(skip_all, fields(half_hours = problem.grid().half_hours(), days = problem.grid().days()))]
    pub fn build(problem: &Problem, options: &ModelOptions) -> Result<Self, ConfigurationError> {
        if let Some(terminal) = options.terminal_energy {
            if !(terminal.is_finite() && terminal >= 0.0) {
                return Err(ConfigurationError::TerminalEnergy(terminal));
            }
        }

        let battery = problem.battery();
        let prices = problem.prices();
        let grid = problem.grid();

        let mut program = LinearProgram::new("battery_energy_trading");

        // Variables (and with them, the objective)
        let export = Market::ALL.map(|market| {
            (0..grid.intervals(market.granularity()))
                .map(|i| {
                    let price = prices.price(market, i);
                    program.add_column(
                        format!("Power_Export_to_{}_{i}", tag(market)),
                        0.0,
                        battery.max_discharge_rate,
                        market.revenue(price, 1.0, 0.0, battery.discharge_efficiency),
                    )
                })
                .collect::<Vec<_>>()
        });
        let import = Market::ALL.map(|market| {
            (0..grid.intervals(market.granularity()))
                .map(|i| {
                    let price = prices.price(market, i);
                    program.add_column(
                        format!("Power_Import_from_{}_{i}", tag(market)),
                        0.0,
                        battery.max_charge_rate,
                        market.revenue(price, 0.0, 1.0, battery.discharge_efficiency),
                    )
                })
                .collect::<Vec<_>>()
        });
        let energy = (0..=grid.half_hours())
            .map(|t| {
                program.add_column(
                    format!("Energy_Stored_{t}"),
                    0.0,
                    battery.max_storage_volume,
                    0.0,
                )
            })
            .collect::<Vec<_>>();

        // The battery starts empty
        program.add_row("Initial_Energy", [(energy[0], 1.0)], Sense::Eq, 0.0);

        let stored = 1.0 - battery.charge_efficiency;
        for t in 0..grid.half_hours() {
            // Every market's position active during half hour t
            let active = |columns: &[Vec<Column>; 3]| {
                Market::ALL
                    .map(|market| columns[market.index()][grid.interval_of(market.granularity(), t)])
            };
            let imports = active(&import);
            let exports = active(&export);

            // E[t+1] - E[t] - 0.5 * stored * Σin + 0.5 * Σout = 0
            let balance = [(energy[t + 1], 1.0), (energy[t], -1.0)]
                .into_iter()
                .chain(imports.iter().map(|&column| (column, -0.5 * stored)))
                .chain(exports.iter().map(|&column| (column, 0.5)));
            program.add_row(format!("Energy_Balance_{t}"), balance, Sense::Eq, 0.0);

            program.add_row(
                format!("Charge_Rate_{t}"),
                imports.map(|column| (column, 1.0)),
                Sense::Le,
                battery.max_charge_rate,
            );
            program.add_row(
                format!("Discharge_Rate_{t}"),
                exports.map(|column| (column, 1.0)),
                Sense::Le,
                battery.max_discharge_rate,
            );
        }

        if let Some(terminal) = options.terminal_energy {
            let last = energy[grid.half_hours()];
            program.add_row("Terminal_Energy", [(last, 1.0)], Sense::Eq, terminal);
        }

        event!(
            Level::DEBUG,
            columns = program.columns().len(),
            rows = program.rows().len(),
            "built battery model"
        );

        Ok(Self {
            program,
            handles: VariableHandles {
                export,
                import,
                energy,
            },
        })
    }

    /// The linear program
    pub fn program(&self) -> &LinearProgram {
        &self.program
    }

    /// The variable handles
    pub fn handles(&self) -> &VariableHandles {
        &self.handles
    }

    /// Take apart into the program (objective and constraints) and the handles
    pub fn into_parts(self) -> (LinearProgram, VariableHandles) {
        (self.program, self.handles)
    }
}

fn tag(market: Market) -> &'static str {
    match market {
        Market::Market1 => "Market1",
        Market::Market2 => "Market2",
        Market::Market3 => "Market3",
    }
}
