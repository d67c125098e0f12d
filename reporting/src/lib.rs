//! Export collaborators for the simulation engine: tabular (CSV) output,
//! chart-data preparation and report composition. Rendering of rasters,
//! spreadsheets and paginated documents stays with external tooling; this
//! crate only shapes the data they consume.

pub mod charts;
pub mod prelude;
pub mod report;
pub mod tabular;
pub mod utils;
