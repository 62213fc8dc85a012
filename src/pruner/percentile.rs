//! Percentile pruner: prune trials outside the best N% at each step.
//!
//! A generalization of [`MedianPruner`](super::MedianPruner) that controls
//! how aggressively to prune. Lower percentiles keep only the best few
//! trials; 50% behaves like the median pruner.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `percentile` | *(required)* | Keep trials in the best N%, range `(0, 100)` |
//! | `n_warmup_steps` | 0 | Skip pruning before this step |
//! | `n_min_trials` | 1 | Require at least N peer values before pruning |

use super::Pruner;
use crate::types::Direction;

/// Prune trials that are not in the best `percentile`% of their peers at
/// the same step.
///
/// # Examples
///
/// ```
/// use parzen::Direction;
/// use parzen::pruner::{PercentilePruner, Pruner};
///
/// // Keep only the best quarter.
/// let pruner = PercentilePruner::new(25.0, Direction::Minimize);
/// assert!(pruner.should_prune(4, 0, &[(0, 2.5)], &[1.0, 2.0, 3.0, 4.0]));
/// ```
#[derive(Clone, Debug)]
pub struct PercentilePruner {
    /// Keep trials in the best `percentile`%. Range: (0.0, 100.0).
    percentile: f64,
    /// Don't prune before this step.
    n_warmup_steps: u64,
    /// Require at least N peer values before pruning.
    n_min_trials: usize,
    /// The optimization direction.
    direction: Direction,
}

impl PercentilePruner {
    /// Create a new `PercentilePruner` for the given percentile and direction.
    ///
    /// # Panics
    ///
    /// Panics if `percentile` is not in `(0.0, 100.0)`.
    #[must_use]
    pub fn new(percentile: f64, direction: Direction) -> Self {
        assert!(
            percentile > 0.0 && percentile < 100.0,
            "percentile must be in (0.0, 100.0), got {percentile}"
        );
        Self {
            percentile,
            n_warmup_steps: 0,
            n_min_trials: 1,
            direction,
        }
    }

    /// Set the number of warmup steps. No pruning occurs before this step.
    #[must_use]
    pub fn n_warmup_steps(mut self, n: u64) -> Self {
        self.n_warmup_steps = n;
        self
    }

    /// Set the minimum number of peer values required before pruning.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    #[must_use]
    pub fn n_min_trials(mut self, n: usize) -> Self {
        assert!(n >= 1, "n_min_trials must be >= 1, got {n}");
        self.n_min_trials = n;
        self
    }

    /// Percentile of the ascending peer values that separates the best
    /// `percentile`% from the rest.
    fn ascending_percentile(&self) -> f64 {
        match self.direction {
            Direction::Minimize => self.percentile,
            Direction::Maximize => 100.0 - self.percentile,
        }
    }
}

impl Pruner for PercentilePruner {
    fn should_prune(
        &self,
        _trial_id: u64,
        step: u64,
        intermediate_values: &[(u64, f64)],
        peer_values: &[f64],
    ) -> bool {
        if step < self.n_warmup_steps {
            return false;
        }

        let Some(&(_, current_value)) = intermediate_values.last() else {
            return false;
        };

        if peer_values.len() < self.n_min_trials {
            return false;
        }

        let mut values = peer_values.to_vec();
        let threshold = compute_percentile(&mut values, self.ascending_percentile());
        self.direction.is_worse(current_value, threshold)
    }
}

/// Compute the given percentile of a non-empty slice, interpolating
/// linearly between the two nearest ranks. Sorts the slice in place.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn compute_percentile(values: &mut [f64], percentile: f64) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    let len = values.len();
    if len == 1 {
        return values[0];
    }
    let rank = percentile / 100.0 * (len - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        values[lower]
    } else {
        let frac = rank - lower as f64;
        values[lower] * (1.0 - frac) + values[upper] * frac
    }
}
