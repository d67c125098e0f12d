use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::core::parameters::{SimulationParameters, COST_RATIO_WINDOW};
use crate::core::trial::{Trial, TrialSet};
use crate::utils::errors::{Result, SimulationError};

/// Draws one trial from a model's outcome distribution.
pub trait SamplingModel {
    fn sample_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Trial;
}

/// Batch generation on top of a sampling model.
pub trait MonteCarloEngine: SamplingModel {
    /// Generates `run_count` independent trials in order.
    ///
    /// Either yields a complete set of the requested length or fails; no
    /// partial results.
    fn generate<R: Rng + ?Sized>(&self, run_count: usize, rng: &mut R) -> Result<TrialSet> {
        if run_count == 0 {
            return Err(SimulationError::InvalidParameter(
                "run_count must be at least 1".to_string(),
            ));
        }
        Ok((0..run_count).map(|_| self.sample_trial(rng)).collect())
    }
}

/// Fixed-shape uniform perturbation of revenue and cost ratio.
///
/// Per trial: revenue is `base_sales` shocked by a symmetric uniform draw of
/// half-width `growth_rate`, cost is revenue times a uniform ratio drawn from
/// `cost_fraction ± 0.05`, and profit is the after-tax margin.
pub struct UniformPerturbationModel {
    parameters: SimulationParameters,
    growth_shock: Uniform<f64>,
    cost_ratio: Uniform<f64>,
}

impl UniformPerturbationModel {
    pub fn new(parameters: SimulationParameters) -> UniformPerturbationModel {
        // validated parameters guarantee low <= high for both windows
        let g = parameters.growth_rate();
        let c = parameters.cost_fraction();
        UniformPerturbationModel {
            parameters,
            growth_shock: Uniform::new_inclusive(-g, g),
            cost_ratio: Uniform::new_inclusive(c - COST_RATIO_WINDOW, c + COST_RATIO_WINDOW),
        }
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }
}

impl SamplingModel for UniformPerturbationModel {
    fn sample_trial<R: Rng + ?Sized>(&self, rng: &mut R) -> Trial {
        let revenue = self.parameters.base_sales() * (1.0 + self.growth_shock.sample(rng));
        // for cost fractions below the window half-width the ratio can be
        // negative; the draw passes through unclamped
        let cost = revenue * self.cost_ratio.sample(rng);
        let profit = (revenue - cost) * (1.0 - self.parameters.tax_fraction());
        Trial::new(revenue, cost, profit)
    }
}

impl MonteCarloEngine for UniformPerturbationModel {}
