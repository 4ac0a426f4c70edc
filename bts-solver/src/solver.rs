use crate::lp::{Column, LinearProgram};
use std::{fmt, time::Duration};

/// The Solver trait defines the interface for linear-programming backends.
///
/// A Solver takes a [`LinearProgram`] and maximizes its objective. Whether
/// the solve reached optimality is part of the successful result; an `Err`
/// is reserved for a backend that could not run at all.
pub trait Solver {
    /// The configuration type for this solver
    type Settings;

    /// Create a new instance with the provided settings
    fn new(settings: Self::Settings) -> Self;

    /// Solve the program to optimality, if possible
    fn solve(&self, program: &LinearProgram) -> Result<SolveOutcome, SolverError>;
}

/// Backend-independent knobs for a solve
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings {
    /// Stop after this long and report [`Status::NotSolved`]
    #[cfg_attr(feature = "serde", serde(with = "humantime_serde::option"))]
    pub time_limit: Option<Duration>,
    /// Let the backend print its own progress
    pub verbose: bool,
    /// Feasibility and optimality-gap tolerance
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            time_limit: None,
            verbose: false,
            tolerance: 1e-8,
        }
    }
}

/// The termination status of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// An optimal solution was found
    Optimal,
    /// The constraints cannot all be satisfied
    Infeasible,
    /// The objective can grow without limit
    Unbounded,
    /// The solver stopped without a conclusion (time or iteration limit,
    /// numerical trouble)
    NotSolved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "Optimal",
            Self::Infeasible => "Infeasible",
            Self::Unbounded => "Unbounded",
            Self::NotSolved => "Not Solved",
        })
    }
}

/// The optimal objective value and the value of every column
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    objective: f64,
    values: Vec<f64>,
}

impl Solution {
    /// Package a solver's output. `values` must be indexed by [`Column::index`].
    pub fn new(objective: f64, values: Vec<f64>) -> Self {
        Self { objective, values }
    }

    /// The optimal objective value
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// The solved value of a column
    pub fn value(&self, column: Column) -> f64 {
        self.values[column.index()]
    }

    /// Every column value
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// What a solve produced. Variable values only exist for an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Solved to optimality
    Optimal(Solution),
    /// Proven infeasible
    Infeasible,
    /// Proven unbounded
    Unbounded,
    /// Stopped without a conclusion
    NotSolved,
}

impl SolveOutcome {
    /// The termination status
    pub fn status(&self) -> Status {
        match self {
            Self::Optimal(_) => Status::Optimal,
            Self::Infeasible => Status::Infeasible,
            Self::Unbounded => Status::Unbounded,
            Self::NotSolved => Status::NotSolved,
        }
    }

    /// The solution, or the status if there is none
    pub fn into_solution(self) -> Result<Solution, Status> {
        match self {
            Self::Optimal(solution) => Ok(solution),
            other => Err(other.status()),
        }
    }
}

/// Errors that prevent a backend from running
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The backend rejected its settings or the problem data
    #[error("solver unavailable: {0}")]
    Unavailable(String),
}
