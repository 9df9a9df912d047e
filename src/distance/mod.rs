//! Travel-cost matrices.
//!
//! Provides the dense weight view of a condensed graph that the tour
//! heuristics operate on.

mod matrix;

pub use matrix::DistanceMatrix;
