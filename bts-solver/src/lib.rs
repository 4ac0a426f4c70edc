/**
 * The solver-agnostic linear program the battery model is expressed in.
 */
pub mod lp;

/**
 * Translation of battery physics and market structure into a linear program.
 */
mod model;
pub use model::*;

/**
 * The solver interface and the data types it produces.
 */
mod solver;
pub use solver::*;

/**
 * These are implementations of the solver interface.
 */
mod impls;
pub use impls::*;

/**
 * Reading solved values back into half-hourly tables.
 */
mod extract;
pub use extract::*;

/**
 * Splitting the optimal profit into calendar years.
 */
mod attribute;
pub use attribute::*;

/**
 * The end-to-end run from validated inputs to result tables.
 */
mod optimize;
pub use optimize::*;

/// Writers for standard model file formats
pub mod export;

/// Serializable documents for writing reports
#[cfg(feature = "serde")]
pub mod io;
