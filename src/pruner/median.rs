use super::Pruner;
use crate::types::Direction;

/// Prune trials that are performing worse than the median of their peers
/// at the same step.
///
/// A trial is pruned when its latest value is strictly worse than the
/// median: greater for [`Direction::Minimize`], smaller for
/// [`Direction::Maximize`]. A value equal to the median is kept.
///
/// # Examples
///
/// ```
/// use parzen::Direction;
/// use parzen::pruner::{MedianPruner, Pruner};
///
/// let pruner = MedianPruner::new(Direction::Maximize).n_warmup_steps(1);
///
/// let peers = [0.9, 0.5, 0.1];
/// assert!(pruner.should_prune(3, 5, &[(5, 0.05)], &peers));
/// assert!(!pruner.should_prune(3, 5, &[(5, 0.95)], &peers));
/// ```
#[derive(Clone, Debug)]
pub struct MedianPruner {
    /// The optimization direction.
    direction: Direction,
    /// Don't prune before this step (let the trial warm up).
    n_warmup_steps: u64,
    /// Require at least N peer values before pruning.
    n_min_trials: usize,
}

impl MedianPruner {
    /// Create a new `MedianPruner` for the given optimization direction.
    ///
    /// By default, `n_warmup_steps` is 0 and `n_min_trials` is 1.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            n_warmup_steps: 0,
            n_min_trials: 1,
        }
    }

    /// Set the number of warmup steps. No pruning occurs before this step.
    #[must_use]
    pub fn n_warmup_steps(mut self, n: u64) -> Self {
        self.n_warmup_steps = n;
        self
    }

    /// Set the minimum number of peer values required before pruning.
    #[must_use]
    pub fn n_min_trials(mut self, n: usize) -> Self {
        self.n_min_trials = n;
        self
    }

    /// Returns the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Pruner for MedianPruner {
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

        if peer_values.is_empty() || peer_values.len() < self.n_min_trials {
            return false;
        }

        let mut values = peer_values.to_vec();
        let median = compute_median(&mut values);
        self.direction.is_worse(current_value, median)
    }
}

/// Compute the median of a non-empty slice. Sorts the slice in place.
fn compute_median(values: &mut [f64]) -> f64 {
    values.sort_unstable_by(f64::total_cmp);
    let len = values.len();
    if len % 2 == 1 {
        values[len / 2]
    } else {
        f64::midpoint(values[len / 2 - 1], values[len / 2])
    }
}
