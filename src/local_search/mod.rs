//! Local search operators for improving waypoint tours.
//!
//! - [`pairwise_exchange`] — Randomised 2-opt edge exchange on a cyclic tour

mod two_opt;

pub use two_opt::pairwise_exchange;
