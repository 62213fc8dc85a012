//! Shared, append-only trial log.

use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::error::{Error, Result};
use crate::trial::Trial;
use crate::types::Direction;

/// Completion-ordered log of trials, shared across threads.
///
/// Cloning is cheap: clones share the same log and id counter. Readers
/// take a read lock and always see whole records; a reader that started
/// before an append simply does not see it.
///
/// # Examples
///
/// ```
/// use parzen::{Params, Trial, TrialHistory};
///
/// let history = TrialHistory::new();
/// let id = history.next_trial_id();
/// history.push(Trial::succeeded(id, Params::new(), 0.5).unwrap()).unwrap();
/// assert_eq!(history.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrialHistory {
    trials: Arc<RwLock<Vec<Trial>>>,
    next_id: Arc<AtomicU64>,
}

impl TrialHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history pre-populated with `trials`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateTrial` if two trials share an id.
    pub fn with_trials(trials: Vec<Trial>) -> Result<Self> {
        let history = Self::new();
        for trial in trials {
            history.push(trial)?;
        }
        Ok(history)
    }

    /// Appends a finished trial.
    ///
    /// The id counter is bumped past the trial's id so that
    /// [`next_trial_id`](Self::next_trial_id) never hands it out again.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateTrial` if a trial with the same id is
    /// already recorded.
    pub fn push(&self, trial: Trial) -> Result<()> {
        let mut trials = self.trials.write();
        if trials.iter().any(|t| t.id() == trial.id()) {
            return Err(Error::DuplicateTrial(trial.id()));
        }
        self.next_id
            .fetch_max(trial.id().saturating_add(1), Ordering::SeqCst);
        trials.push(trial);
        Ok(())
    }

    /// Atomically returns a fresh trial id.
    pub fn next_trial_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Takes a read lock on the log.
    ///
    /// Hold the guard only for the duration of a read; appends wait for it.
    pub fn read(&self) -> RwLockReadGuard<'_, Vec<Trial>> {
        self.trials.read()
    }

    /// Copies the current log.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Trial> {
        self.trials.read().clone()
    }

    /// Number of recorded trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trials.read().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trials.read().is_empty()
    }

    /// Number of succeeded trials.
    #[must_use]
    pub fn n_succeeded(&self) -> usize {
        self.trials.read().iter().filter(|t| t.is_succeeded()).count()
    }

    /// Returns the best succeeded trial; the earliest wins ties.
    #[must_use]
    pub fn best_trial(&self, direction: Direction) -> Option<Trial> {
        let trials = self.trials.read();
        let mut best: Option<&Trial> = None;
        for trial in trials.iter().filter(|t| t.is_succeeded()) {
            let Some(score) = trial.score() else { continue };
            match best.and_then(Trial::score) {
                Some(b) if !direction.is_worse(b, score) => {}
                _ => best = Some(trial),
            }
        }
        best.cloned()
    }
}
