use serde::{Deserialize, Serialize};

use finsim::prelude::{SimulationError, SweepPoint, TrialSet};

use crate::utils::errors::{ReportError, Result};

/// Default bin count for the profit histogram.
pub const DEFAULT_BIN_COUNT: usize = 20;

/// Binned profit distribution, shaped for an external chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitHistogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Ascending edges; `counts.len() + 1` entries.
    pub bin_edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl ProfitHistogram {
    /// Fixed-width binning of the profit column.
    ///
    /// A zero-width profit range (all trials equal) degenerates to a single
    /// occupied bin of unit width around the common value.
    pub fn from_trials(trials: &TrialSet, bin_count: usize) -> Result<ProfitHistogram> {
        if bin_count == 0 {
            return Err(ReportError::InvalidChart(
                "bin count must be at least 1".to_string(),
            ));
        }
        if trials.is_empty() {
            return Err(SimulationError::EmptyInput(
                "histogram requires at least one trial".to_string(),
            )
            .into());
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in trials.profits() {
            min = min.min(p);
            max = max.max(p);
        }
        let (min, max) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let width = (max - min) / bin_count as f64;

        let mut counts = vec![0u64; bin_count];
        for p in trials.profits() {
            let index = (((p - min) / width) as usize).min(bin_count - 1);
            counts[index] += 1;
        }
        let bin_edges = (0..=bin_count).map(|i| min + width * i as f64).collect();

        Ok(ProfitHistogram {
            title: "Simulated Profit Distribution".to_string(),
            x_label: "Profit (Rs.)".to_string(),
            y_label: "Frequency".to_string(),
            bin_edges,
            counts,
        })
    }

    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Growth-rate (percent) vs average-profit line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub growth_rate_pct: Vec<f64>,
    pub mean_profit: Vec<f64>,
}

impl SweepSeries {
    pub fn from_points(points: &[SweepPoint]) -> SweepSeries {
        SweepSeries {
            title: "Growth Rate vs Average Profit".to_string(),
            x_label: "Growth Rate (%)".to_string(),
            y_label: "Average Profit (Rs.)".to_string(),
            growth_rate_pct: points.iter().map(|p| p.growth_rate * 100.0).collect(),
            mean_profit: points.iter().map(|p| p.mean_profit).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.growth_rate_pct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.growth_rate_pct.is_empty()
    }
}
