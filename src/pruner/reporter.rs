//! Intermediate report tracking.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::Pruner;
use crate::error::{Error, Result};
use crate::trial::Trial;

/// Records `(step, value)` reports per trial and asks a [`Pruner`]
/// whether a trial should stop.
///
/// A trial is compared only with peers that reported at exactly the step
/// of its latest report. Peers include finished trials whose reports are
/// still tracked. Reports arrive from concurrently running trials, so a
/// decision reflects whatever peers had reported when it was made.
///
/// # Examples
///
/// ```
/// use parzen::Direction;
/// use parzen::pruner::{MedianPruner, PruningReporter};
///
/// let reporter = PruningReporter::new(MedianPruner::new(Direction::Maximize).n_warmup_steps(1));
/// for (id, value) in [(0, 0.9), (1, 0.5), (2, 0.1)] {
///     reporter.report(id, 5, value).unwrap();
/// }
///
/// reporter.report(3, 5, 0.05).unwrap();
/// assert!(reporter.should_prune(3));
/// ```
#[derive(Debug)]
pub struct PruningReporter<P> {
    pruner: P,
    reports: RwLock<HashMap<u64, Vec<(u64, f64)>>>,
}

impl<P: Pruner> PruningReporter<P> {
    /// Creates a reporter with no recorded reports.
    #[must_use]
    pub fn new(pruner: P) -> Self {
        Self {
            pruner,
            reports: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a reporter seeded with the intermediate values recorded on
    /// finished trials, so that new trials are compared against them.
    #[must_use]
    pub fn with_history(pruner: P, trials: &[Trial]) -> Self {
        let reports = trials
            .iter()
            .filter(|t| !t.intermediate_values().is_empty())
            .map(|t| (t.id(), t.intermediate_values().to_vec()))
            .collect();
        Self {
            pruner,
            reports: RwLock::new(reports),
        }
    }

    /// Returns the pruning rule.
    #[must_use]
    pub fn pruner(&self) -> &P {
        &self.pruner
    }

    /// Records a report for `trial_id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NonFiniteReport` for a NaN or infinite value, and
    /// `Error::NonIncreasingStep` if `step` does not exceed the trial's
    /// last reported step.
    pub fn report(&self, trial_id: u64, step: u64, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::NonFiniteReport { trial_id, step });
        }

        let mut reports = self.reports.write();
        let values = reports.entry(trial_id).or_default();
        if let Some(&(last_step, _)) = values.last()
            && step <= last_step
        {
            return Err(Error::NonIncreasingStep {
                trial_id,
                step,
                last_step,
            });
        }
        values.push((step, value));
        Ok(())
    }

    /// Asks the pruner about `trial_id`'s latest report.
    ///
    /// Returns `false` when the trial has not reported anything.
    pub fn should_prune(&self, trial_id: u64) -> bool {
        let reports = self.reports.read();
        let Some(values) = reports.get(&trial_id) else {
            return false;
        };
        let Some(&(step, _)) = values.last() else {
            return false;
        };

        let peers: Vec<f64> = reports
            .iter()
            .filter(|&(&id, _)| id != trial_id)
            .filter_map(|(_, vs)| {
                vs.binary_search_by_key(&step, |&(s, _)| s)
                    .ok()
                    .map(|i| vs[i].1)
            })
            .collect();

        let prune = self.pruner.should_prune(trial_id, step, values, &peers);
        if prune {
            trace_info!(trial_id, step, "prune recommended");
        }
        prune
    }

    /// Returns the reports recorded for `trial_id`, in step order.
    #[must_use]
    pub fn intermediate_values(&self, trial_id: u64) -> Vec<(u64, f64)> {
        self.reports
            .read()
            .get(&trial_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Drops a trial's reports so it no longer serves as a peer, returning
    /// them.
    pub fn forget(&self, trial_id: u64) -> Option<Vec<(u64, f64)>> {
        self.reports.write().remove(&trial_id)
    }

    /// Ids of all trials with recorded reports, ascending.
    #[must_use]
    pub fn reported_trials(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.reports.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
