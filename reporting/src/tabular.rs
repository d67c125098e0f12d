use std::io::Write;

use finsim::prelude::TrialSet;

use crate::utils::errors::Result;

pub const CSV_HEADER: &str = "Revenue,Cost,Profit";

/// Writes the raw ordered trial set as CSV, one row per trial.
///
/// No transformation is applied; the consumer receives exactly the values
/// the engine produced, in generation order.
pub fn write_trials_csv<W: Write>(trials: &TrialSet, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for trial in trials {
        writeln!(writer, "{},{},{}", trial.revenue, trial.cost, trial.profit)?;
    }
    Ok(())
}

pub fn trials_to_csv(trials: &TrialSet) -> Result<String> {
    let mut buffer = Vec::new();
    write_trials_csv(trials, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("csv output is utf-8"))
}
