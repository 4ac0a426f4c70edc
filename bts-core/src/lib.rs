#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for battery trading.
///
/// This module contains the inputs (battery parameters, market prices), the
/// time grid that relates the two price granularities, and the output tables
/// produced by a solve. The models carry validation but no optimization logic.
pub mod models;

/// Interface traits for the external loaders and writers.
///
/// Reading the battery specification and price series, and writing the result
/// tables, happen outside of this workspace's core. These traits describe the
/// contract so that file formats can be swapped without touching the solver.
pub mod ports;
