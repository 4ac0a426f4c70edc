use crate::{
    AttributionError, BatteryModel, ModelOptions, Solver, SolverError, Status, attribute, extract,
};
use bts_core::models::{ConfigurationError, OptimalDecisions, OptimalProfits, Problem};
use tracing::{Level, event, instrument};

/// The result tables of an optimal solve
#[derive(Debug, Clone)]
pub struct Report {
    /// Always [`Status::Optimal`]; kept so callers can print it uniformly
    pub status: Status,
    /// The optimal objective value reported by the solver
    pub objective: f64,
    /// The half-hourly schedule
    pub decisions: OptimalDecisions,
    /// The profit per calendar year
    pub profits: OptimalProfits,
}

/// Errors that can occur between validated inputs and result tables
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    /// The model options are unusable
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The solver backend could not run
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// The solve finished without an optimal solution, so there is nothing
    /// to extract or attribute
    #[error("optimization status: {0}")]
    NotOptimal(Status),
    /// The optimal profit could not be split across years
    #[error("profit attribution failed: {0}")]
    Attribution(#[from] AttributionError),
}

impl OptimizeError {
    /// The solver status this error corresponds to, if a solve was attempted
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::NotOptimal(status) => Some(*status),
            Self::Attribution(_) => Some(Status::Optimal),
            _ => None,
        }
    }
}

/// Build, solve, extract and attribute, in that order.
///
/// Extraction and attribution only run on an optimal solve; any other status
/// is returned as [`OptimizeError::NotOptimal`].
#[instrument(skip_all)]
pub fn optimize<S: Solver>(
    problem: &Problem,
    options: &ModelOptions,
    solver: &S,
) -> Result<Report, OptimizeError> {
    let (program, handles) = BatteryModel::build(problem, options)?.into_parts();

    let outcome = solver.solve(&program)?;
    let status = outcome.status();
    event!(Level::INFO, status = %status, "optimization finished");

    let solution = outcome.into_solution().map_err(OptimizeError::NotOptimal)?;
    event!(Level::INFO, profit = solution.objective(), "optimal profit");

    let decisions = extract(problem, &handles, &solution);
    let profits = attribute(problem, &decisions, solution.objective())?;

    Ok(Report {
        status,
        objective: solution.objective(),
        decisions,
        profits,
    })
}
