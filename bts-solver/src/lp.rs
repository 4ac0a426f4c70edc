//! A small, solver-agnostic representation of a linear program.
//!
//! The program maximizes `c'x` subject to `lower <= x <= upper` and a list of
//! sparse linear rows. Solver implementations translate it into whatever
//! form their backend expects; the exporters write it to text.

use std::fmt;

/// A handle to a decision variable of a [`LinearProgram`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Column(usize);

impl Column {
    /// The position of this column, which is also the position of its value
    /// in a solution vector
    pub fn index(self) -> usize {
        self.0
    }
}

/// A decision variable: its bounds and its objective coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// A name that is unique within the program
    pub name: String,
    /// The lower bound (may be -inf)
    pub lower: f64,
    /// The upper bound (may be +inf)
    pub upper: f64,
    /// The coefficient in the (maximized) objective
    pub objective: f64,
}

/// The relation between a row's activity and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// `a'x = rhs`
    Eq,
    /// `a'x <= rhs`
    Le,
    /// `a'x >= rhs`
    Ge,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Eq => "=",
            Self::Le => "<=",
            Self::Ge => ">=",
        })
    }
}

/// A linear constraint
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// A name that is unique within the program
    pub name: String,
    /// The non-zero coefficients, sorted by column with no repeats
    pub terms: Vec<(Column, f64)>,
    /// The relation to the right-hand side
    pub sense: Sense,
    /// The right-hand side
    pub rhs: f64,
}

impl Row {
    /// `a'x` for the given point
    pub fn activity(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(column, coefficient)| coefficient * x[column.index()])
            .sum()
    }

    /// How far `x` is from satisfying this row (zero when satisfied)
    pub fn violation(&self, x: &[f64]) -> f64 {
        let activity = self.activity(x);
        match self.sense {
            Sense::Eq => (activity - self.rhs).abs(),
            Sense::Le => (activity - self.rhs).max(0.0),
            Sense::Ge => (self.rhs - activity).max(0.0),
        }
    }
}

/// A linear program whose objective is maximized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearProgram {
    name: String,
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
}

impl LinearProgram {
    /// An empty program
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a bounded variable with the given objective coefficient.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        objective: f64,
    ) -> Column {
        self.columns.push(ColumnSpec {
            name: name.into(),
            lower,
            upper,
            objective,
        });
        Column(self.columns.len() - 1)
    }

    /// Add a constraint. Coefficients for the same column are summed and
    /// zeros are dropped, so the stored row is a proper sparse vector.
    pub fn add_row(
        &mut self,
        name: impl Into<String>,
        terms: impl IntoIterator<Item = (Column, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        let mut terms = terms.into_iter().collect::<Vec<_>>();
        terms.sort_unstable_by_key(|(column, _)| *column);

        let mut merged: Vec<(Column, f64)> = Vec::with_capacity(terms.len());
        for (column, coefficient) in terms {
            match merged.last_mut() {
                Some((last, sum)) if *last == column => *sum += coefficient,
                _ => merged.push((column, coefficient)),
            }
        }
        merged.retain(|(_, coefficient)| *coefficient != 0.0);

        self.rows.push(Row {
            name: name.into(),
            terms: merged,
            sense,
            rhs,
        });
    }

    /// The program's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decision variables, indexed by [`Column::index`]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// The constraints, in insertion order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The specification of a single column
    pub fn column(&self, column: Column) -> &ColumnSpec {
        &self.columns[column.index()]
    }

    /// The objective value `c'x`
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.columns
            .iter()
            .zip(x)
            .map(|(spec, value)| spec.objective * value)
            .sum()
    }

    /// The largest violation of any bound or row at `x`
    pub fn violation(&self, x: &[f64]) -> f64 {
        let bounds = self
            .columns
            .iter()
            .zip(x)
            .map(|(spec, &value)| (spec.lower - value).max(value - spec.upper).max(0.0));
        let rows = self.rows.iter().map(|row| row.violation(x));
        bounds.chain(rows).fold(0.0, f64::max)
    }
}
