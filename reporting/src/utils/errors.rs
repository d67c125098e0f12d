use finsim::utils::errors::SimulationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid chart: {0}")]
    InvalidChart(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
