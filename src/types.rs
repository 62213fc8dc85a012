//! Core enums shared by the sampler, the history, and the pruners.

use core::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The direction of optimization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Lower scores are better.
    #[default]
    Minimize,
    /// Higher scores are better.
    Maximize,
}

impl Direction {
    /// Orders two scores so that the better one comes first.
    ///
    /// NaN compares equal to everything, which keeps sorting stable.
    #[must_use]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Direction::Minimize => ord,
            Direction::Maximize => ord.reverse(),
        }
    }

    /// Returns `true` if `a` is strictly worse than `b`.
    #[must_use]
    pub fn is_worse(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a > b,
            Direction::Maximize => a < b,
        }
    }
}

/// The state of a trial in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrialStatus {
    /// The objective is still being evaluated.
    Running,
    /// The objective returned a score.
    Succeeded,
    /// The objective raised an error.
    Failed,
    /// The trial was stopped early on a pruning recommendation.
    Pruned,
}
