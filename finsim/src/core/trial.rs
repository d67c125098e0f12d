use serde::{Deserialize, Serialize};

/// One simulated (revenue, cost, profit) outcome. Immutable once produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

impl Trial {
    pub fn new(revenue: f64, cost: f64, profit: f64) -> Trial {
        Trial {
            revenue,
            cost,
            profit,
        }
    }
}

/// Ordered collection of trials from a single simulation run.
///
/// Trials are kept in generation order. The order is insertion order only,
/// trials are i.i.d. and the sequence carries no further meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialSet {
    trials: Vec<Trial>,
}

impl TrialSet {
    pub fn new(trials: Vec<Trial>) -> TrialSet {
        TrialSet { trials }
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Trial> {
        self.trials.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trial> {
        self.trials.iter()
    }

    /// Profit column in generation order.
    pub fn profits(&self) -> impl Iterator<Item = f64> + '_ {
        self.trials.iter().map(|t| t.profit)
    }
}

impl FromIterator<Trial> for TrialSet {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> TrialSet {
        TrialSet {
            trials: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TrialSet {
    type Item = &'a Trial;
    type IntoIter = std::slice::Iter<'a, Trial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}
