use crate::lp::{LinearProgram, Sense};
use crate::{Solution, SolveOutcome, Solver, SolverError, SolverSettings};
use clarabel::{algebra::*, solver::*};
use tracing::{Level, event, instrument};

/// A solver implementation that uses the Clarabel interior point solver.
///
/// Clarabel minimizes `x'Px/2 + q'x` subject to `Ax + s = b` with `s` in a
/// product of cones. A linear program is the special case `P = 0`, with the
/// equality rows in the zero cone and everything else in the nonnegative cone.
pub struct ClarabelSolver(SolverSettings);

impl Default for ClarabelSolver {
    fn default() -> Self {
        Self(SolverSettings::default())
    }
}

impl Solver for ClarabelSolver {
    type Settings = SolverSettings;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    #[instrument(skip_all, fields(columns = program.columns().len(), rows = program.rows().len()))]
    fn solve(&self, program: &LinearProgram) -> Result<SolveOutcome, SolverError> {
        let n = program.columns().len();

        // Clarabel's cone specification requires the equality rows to come first,
        // so we figure out how many of these there are up front.
        let nzero = program
            .rows()
            .iter()
            .filter(|row| row.sense == Sense::Eq)
            .count();

        // Clarabel's matrix input is in the form of CSC, but our rows are stored
        // row-wise, so we gather the entries of each column first. Rows are visited
        // in increasing order, so each column's entries come out sorted.
        let mut entries: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        let mut b = vec![0.0; nzero];

        let mut zero_row = 0;
        for row in program.rows().iter().filter(|row| row.sense == Sense::Eq) {
            for &(column, weight) in row.terms.iter() {
                entries[column.index()].push((zero_row, weight));
            }
            b[zero_row] = row.rhs;
            zero_row += 1;
        }

        // The inequality rows all become a'x + s = rhs with s >= 0, so the signs
        // on a >= row are flipped.
        for row in program.rows().iter().filter(|row| row.sense != Sense::Eq) {
            let sign = if row.sense == Sense::Ge { -1.0 } else { 1.0 };
            for &(column, weight) in row.terms.iter() {
                entries[column.index()].push((b.len(), sign * weight));
            }
            b.push(sign * row.rhs);
        }

        // Now we add the box constraints, likewise in the nonnegative cone.
        for (j, spec) in program.columns().iter().enumerate() {
            if spec.upper.is_finite() {
                entries[j].push((b.len(), 1.0));
                b.push(spec.upper);
            }
            if spec.lower.is_finite() {
                entries[j].push((b.len(), -1.0));
                b.push(-spec.lower);
            }
        }

        let mut a_colptr = Vec::with_capacity(n + 1);
        let mut a_rowval = Vec::new();
        let mut a_nzval = Vec::new();
        for column in entries {
            a_colptr.push(a_nzval.len());
            for (row, weight) in column {
                a_rowval.push(row);
                a_nzval.push(weight);
            }
        }
        a_colptr.push(a_nzval.len());

        let a_matrix = CscMatrix::new(b.len(), n, a_colptr, a_rowval, a_nzval);

        // There is no quadratic term, and we maximize by minimizing the negation
        let p_matrix = CscMatrix::new(n, n, vec![0; n + 1], Vec::new(), Vec::new());
        let q = program
            .columns()
            .iter()
            .map(|spec| -spec.objective)
            .collect::<Vec<_>>();

        let mut cones = Vec::with_capacity(2);
        if nzero > 0 {
            cones.push(ZeroConeT(nzero));
        }
        if b.len() > nzero {
            cones.push(NonnegativeConeT(b.len() - nzero));
        }

        let settings = DefaultSettingsBuilder::default()
            .verbose(self.0.verbose)
            .time_limit(
                self.0
                    .time_limit
                    .map_or(f64::INFINITY, |limit| limit.as_secs_f64()),
            )
            .tol_feas(self.0.tolerance)
            .tol_gap_abs(self.0.tolerance)
            .tol_gap_rel(self.0.tolerance)
            .build()
            .map_err(|err| SolverError::Unavailable(format!("invalid settings: {err:?}")))?;

        let mut solver = DefaultSolver::new(&p_matrix, &q, &a_matrix, &b, &cones, settings)
            .map_err(|err| SolverError::Unavailable(format!("{err:?}")))?;

        // Now we can solve!
        solver.solve();

        let status = solver.solution.status;
        event!(
            Level::DEBUG,
            status = ?status,
            iterations = solver.solution.iterations,
            "clarabel finished"
        );

        Ok(match status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => {
                if matches!(status, SolverStatus::AlmostSolved) {
                    event!(Level::WARN, "solved to reduced accuracy");
                }
                SolveOutcome::Optimal(Solution::new(
                    -solver.solution.obj_val,
                    solver.solution.x.clone(),
                ))
            }
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                SolveOutcome::Infeasible
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                SolveOutcome::Unbounded
            }
            _ => SolveOutcome::NotSolved,
        })
    }
}
