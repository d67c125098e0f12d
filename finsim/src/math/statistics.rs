use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::core::trial::TrialSet;
use crate::utils::errors::{Result, SimulationError};

/// Read-only profit summary over a trial set, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Sample standard deviation (divisor `n - 1`); NaN for a single trial.
    pub std_dev: f64,
}

/// Summarizes the profit column of a non-empty trial set.
pub fn summarize(trials: &TrialSet) -> Result<SummaryStatistics> {
    if trials.is_empty() {
        return Err(SimulationError::EmptyInput(
            "summary statistics require at least one trial".to_string(),
        ));
    }
    let profits: Vec<f64> = trials.profits().collect();
    Ok(SummaryStatistics {
        mean: (&profits).mean(),
        max: (&profits).max(),
        min: (&profits).min(),
        std_dev: (&profits).std_dev(),
    })
}
