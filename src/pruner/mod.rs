//! Pruner trait and implementations for early stopping.
//!
//! Pruners decide whether a running trial should stop early by comparing
//! its latest intermediate value with the values other trials reported at
//! the same step. Decisions are advisory: the caller's loop decides
//! whether to honour them, records the trial as
//! [`Pruned`](crate::TrialStatus::Pruned) and stops the objective.
//!
//! [`PruningReporter`] tracks the reports and asks a [`Pruner`] for the
//! decision.

mod median;
mod nop;
mod percentile;
mod reporter;

pub use median::MedianPruner;
pub use nop::NopPruner;
pub use percentile::PercentilePruner;
pub use reporter::PruningReporter;

/// Trait for pluggable pruning rules.
///
/// The trait requires `Send + Sync` so that one reporter can serve
/// concurrently running trials.
///
/// # Implementing a custom pruner
///
/// ```
/// use parzen::pruner::Pruner;
///
/// struct ThresholdPruner {
///     threshold: f64,
/// }
///
/// impl Pruner for ThresholdPruner {
///     fn should_prune(
///         &self,
///         _trial_id: u64,
///         _step: u64,
///         intermediate_values: &[(u64, f64)],
///         _peer_values: &[f64],
///     ) -> bool {
///         intermediate_values
///             .last()
///             .is_some_and(|&(_, v)| v > self.threshold)
///     }
/// }
/// ```
pub trait Pruner: Send + Sync {
    /// Decide whether to prune a trial at the given step.
    ///
    /// # Arguments
    ///
    /// * `trial_id` - The current trial's ID.
    /// * `step` - The step of the trial's latest report.
    /// * `intermediate_values` - All `(step, value)` pairs reported so far for this trial.
    /// * `peer_values` - Values other trials reported at exactly `step`.
    fn should_prune(
        &self,
        trial_id: u64,
        step: u64,
        intermediate_values: &[(u64, f64)],
        peer_values: &[f64],
    ) -> bool;
}
