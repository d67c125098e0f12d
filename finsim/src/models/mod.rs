pub mod perturbation;
pub mod sweep;
