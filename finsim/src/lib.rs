//! Sampling-and-aggregation engine for financial decision simulations.
//!
//! Produces sets of independent (revenue, cost, profit) trials from a
//! uniform perturbation of scalar inputs, together with summary statistics
//! over the profit distribution and a growth-rate sensitivity sweep.

pub mod core;
pub mod math;
pub mod models;
pub mod prelude;
pub mod utils;
