use serde::{Deserialize, Serialize};

use crate::utils::errors::{Result, SimulationError};

/// Half-width of the uniform window applied around `cost_fraction`.
pub const COST_RATIO_WINDOW: f64 = 0.05;

/// Scalar inputs of the simulation model.
///
/// The run count is not part of the parameter set; it scales the output of
/// a single invocation and is passed to `generate` directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    base_sales: f64,
    growth_rate: f64,
    cost_fraction: f64,
    tax_fraction: f64,
}

impl SimulationParameters {
    /// Validates and builds a parameter set.
    ///
    /// Domain: `base_sales > 0`, `growth_rate` in `[0, 1)`, `cost_fraction`
    /// in `(0, 1)`, `tax_fraction` in `[0, 1)`, all finite. Note that a
    /// `cost_fraction` below [`COST_RATIO_WINDOW`] is valid: the perturbation
    /// window then reaches below zero and negative cost draws pass through
    /// unclamped.
    pub fn new(
        base_sales: f64,
        growth_rate: f64,
        cost_fraction: f64,
        tax_fraction: f64,
    ) -> Result<SimulationParameters> {
        for (name, value) in [
            ("base_sales", base_sales),
            ("growth_rate", growth_rate),
            ("cost_fraction", cost_fraction),
            ("tax_fraction", tax_fraction),
        ] {
            if !value.is_finite() {
                return Err(SimulationError::InvalidParameter(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if base_sales <= 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "base_sales must be positive, got {}",
                base_sales
            )));
        }
        if !(0.0..1.0).contains(&growth_rate) {
            return Err(SimulationError::InvalidParameter(format!(
                "growth_rate must be in [0, 1), got {}",
                growth_rate
            )));
        }
        if cost_fraction <= 0.0 || cost_fraction >= 1.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "cost_fraction must be in (0, 1), got {}",
                cost_fraction
            )));
        }
        if !(0.0..1.0).contains(&tax_fraction) {
            return Err(SimulationError::InvalidParameter(format!(
                "tax_fraction must be in [0, 1), got {}",
                tax_fraction
            )));
        }
        Ok(SimulationParameters {
            base_sales,
            growth_rate,
            cost_fraction,
            tax_fraction,
        })
    }

    /// Same parameter set with a different growth rate, revalidated.
    pub fn with_growth_rate(self, growth_rate: f64) -> Result<SimulationParameters> {
        SimulationParameters::new(
            self.base_sales,
            growth_rate,
            self.cost_fraction,
            self.tax_fraction,
        )
    }

    pub fn base_sales(&self) -> f64 {
        self.base_sales
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn cost_fraction(&self) -> f64 {
        self.cost_fraction
    }

    pub fn tax_fraction(&self) -> f64 {
        self.tax_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reference_inputs() {
        let params = SimulationParameters::new(500_000.0, 0.10, 0.40, 0.20).unwrap();
        assert_eq!(params.base_sales(), 500_000.0);
        assert_eq!(params.growth_rate(), 0.10);
    }

    #[test]
    fn accepts_domain_boundaries() {
        // zero growth and zero tax are inside the domain
        assert!(SimulationParameters::new(1.0, 0.0, 0.5, 0.0).is_ok());
        // small cost fraction is valid even though its window dips below zero
        assert!(SimulationParameters::new(1.0, 0.0, 0.01, 0.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_inputs() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(SimulationParameters::new(bad, 0.1, 0.4, 0.2).is_err());
            assert!(SimulationParameters::new(500_000.0, bad, 0.4, 0.2).is_err());
            assert!(SimulationParameters::new(500_000.0, 0.1, bad, 0.2).is_err());
            assert!(SimulationParameters::new(500_000.0, 0.1, 0.4, bad).is_err());
        }
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        assert!(SimulationParameters::new(0.0, 0.1, 0.4, 0.2).is_err());
        assert!(SimulationParameters::new(-1.0, 0.1, 0.4, 0.2).is_err());
        assert!(SimulationParameters::new(1.0, 1.0, 0.4, 0.2).is_err());
        assert!(SimulationParameters::new(1.0, -0.1, 0.4, 0.2).is_err());
        assert!(SimulationParameters::new(1.0, 0.1, 0.0, 0.2).is_err());
        assert!(SimulationParameters::new(1.0, 0.1, 1.0, 0.2).is_err());
        assert!(SimulationParameters::new(1.0, 0.1, 0.4, 1.0).is_err());
    }

    #[test]
    fn with_growth_rate_revalidates() {
        let params = SimulationParameters::new(500_000.0, 0.10, 0.40, 0.20).unwrap();
        assert_eq!(params.with_growth_rate(0.25).unwrap().growth_rate(), 0.25);
        assert!(params.with_growth_rate(1.5).is_err());
    }
}
