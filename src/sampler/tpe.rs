//! Tree-structured Parzen Estimator sampler.
//!
//! TPE models `P(x | y)` rather than `P(y | x)`. Succeeded trials are split
//! into a good group (the best `gamma` fraction) and a bad group, a density
//! is fitted to each parameter of each group, and the proposal for every
//! parameter is the candidate, drawn from the good density `l(x)`, that
//! maximizes `log l(x) - log g(x)`.
//!
//! Until `min_obs` trials have succeeded the sampler draws every parameter
//! from its prior instead.

use core::fmt;
use std::sync::Arc;

use crate::distribution::{Distribution, nearest_int};
use crate::error::{Error, HistoryIssue, Result};
use crate::history::TrialHistory;
use crate::kde::{CategoricalEstimator, ParzenEstimator};
use crate::param::ParamValue;
use crate::rng_util;
use crate::sampler::config::{HistoryPolicy, TpeConfig};
use crate::sampler::{partition, prior};
use crate::space::{SearchSpace, SearchSpaceFn};
use crate::trial::{Params, Trial};

/// A TPE sampler and its proposal state.
///
/// The sampler is an immutable value. [`next`](Self::next) borrows it,
/// returns the proposal together with the successor state, and leaves
/// `self` untouched, so one sampler can serve many threads at once.
/// Each call draws from its own random stream derived from the seed and
/// the trial index: the same seed, space, history and index always give
/// the same proposal.
///
/// # Examples
///
/// ```
/// use parzen::sampler::{TpeConfig, TpeSampler};
/// use parzen::{SearchSpace, Trial};
///
/// let space = SearchSpace::new()
///     .uniform("x", -5.0, 5.0)
///     .int("depth", 1, 8)
///     .choice("bootstrap", [true, false]);
/// let config = TpeConfig::builder().min_obs(5).seed(42).build().unwrap();
/// let mut sampler = TpeSampler::new(config, space).unwrap();
///
/// let mut history = Vec::new();
/// for i in 0..20 {
///     let (params, next) = sampler.next(&history, i).unwrap();
///     let x = params["x"].as_f64().unwrap();
///     history.push(Trial::succeeded(i, params, x * x).unwrap());
///     sampler = next;
/// }
/// assert_eq!(sampler.proposals(), 20);
/// ```
#[derive(Clone)]
pub struct TpeSampler {
    config: Arc<TpeConfig>,
    seed: u64,
    space: Arc<dyn SearchSpaceFn>,
    proposals: u64,
}

impl fmt::Debug for TpeSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TpeSampler")
            .field("config", &self.config)
            .field("seed", &self.seed)
            .field("proposals", &self.proposals)
            .finish_non_exhaustive()
    }
}

impl TpeSampler {
    /// Creates a sampler over `space`.
    ///
    /// The space is not validated here; a malformed space is reported by
    /// the first [`next`](Self::next) that uses it. Without a configured
    /// seed, one is drawn now and kept for the sampler's lifetime.
    ///
    /// # Errors
    ///
    /// Returns the first configuration constraint `config` violates; see
    /// [`TpeConfig::validate`].
    pub fn new(config: TpeConfig, space: impl SearchSpaceFn + 'static) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        Ok(Self {
            config: Arc::new(config),
            seed,
            space: Arc::new(space),
            proposals: 0,
        })
    }

    /// Creates a sampler with the default configuration.
    #[must_use]
    pub fn with_defaults(space: impl SearchSpaceFn + 'static) -> Self {
        Self {
            config: Arc::new(TpeConfig::default()),
            seed: fastrand::u64(..),
            space: Arc::new(space),
            proposals: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TpeConfig {
        &self.config
    }

    /// Returns the resolved seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns how many proposals led to this state.
    #[must_use]
    pub fn proposals(&self) -> u64 {
        self.proposals
    }

    /// Returns the search space used for `trial_index`.
    #[must_use]
    pub fn space_for(&self, trial_index: u64) -> SearchSpace {
        self.space.space(trial_index)
    }

    /// Proposes parameters for `trial_index` given the completion-ordered
    /// `history`.
    ///
    /// Only succeeded trials inform the proposal. Every returned value lies
    /// within its declared bounds or is one of its declared choices.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSpace` if the space for `trial_index` is
    /// malformed, and `Error::InconsistentHistory` under
    /// [`HistoryPolicy::Strict`] when a succeeded trial carries a name or
    /// value that does not fit that space.
    pub fn next(&self, history: &[Trial], trial_index: u64) -> Result<(Params, TpeSampler)> {
        let space = self.space.space(trial_index);
        space.validate()?;

        let completed: Vec<&Trial> = history.iter().filter(|t| t.is_succeeded()).collect();
        self.check_history(&completed, &space)?;

        let mut rng = rng_util::trial_stream(self.seed, trial_index);

        let params = if completed.len() < self.config.min_obs {
            trace_debug!(trial_index, n_completed = completed.len(), "bootstrap sampling");
            space
                .iter()
                .map(|(name, dist)| (name.to_string(), prior::sample_prior(dist, &mut rng)))
                .collect()
        } else {
            trace_debug!(trial_index, n_completed = completed.len(), "tpe sampling");
            let (good, bad) = partition::split(&completed, self.config.direction, self.config.gamma);
            space
                .iter()
                .map(|(name, dist)| {
                    let value = self.sample_param(name, dist, &good, &bad, &mut rng);
                    (name.to_string(), value)
                })
                .collect()
        };

        let successor = Self {
            proposals: self.proposals.saturating_add(1),
            ..self.clone()
        };
        Ok((params, successor))
    }

    /// Like [`next`](Self::next), reading from a shared history.
    ///
    /// Works on a snapshot: the read lock is released before modeling
    /// starts, so appends made meanwhile are seen by later proposals only.
    ///
    /// # Errors
    ///
    /// Same as [`next`](Self::next).
    pub fn next_from(
        &self,
        history: &TrialHistory,
        trial_index: u64,
    ) -> Result<(Params, TpeSampler)> {
        let trials = history.snapshot();
        self.next(&trials, trial_index)
    }

    fn check_history(&self, completed: &[&Trial], space: &SearchSpace) -> Result<()> {
        for trial in completed {
            for (name, value) in trial.params() {
                let issue = match space.get(name) {
                    None => HistoryIssue::UnknownParameter,
                    Some(dist) if dist.contains(value) => continue,
                    Some(_) => HistoryIssue::ValueMismatch,
                };
                match self.config.history_policy {
                    HistoryPolicy::Strict => {
                        return Err(Error::InconsistentHistory {
                            trial_id: trial.id(),
                            name: name.clone(),
                            issue,
                        });
                    }
                    HistoryPolicy::Lenient => {
                        trace_debug!(
                            trial_id = trial.id(),
                            name = name.as_str(),
                            %issue,
                            "skipping history entry"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn sample_param(
        &self,
        name: &str,
        distribution: &Distribution,
        good: &[&Trial],
        bad: &[&Trial],
        rng: &mut fastrand::Rng,
    ) -> ParamValue {
        let observations = |group: &[&Trial]| -> Vec<f64> {
            group
                .iter()
                .filter_map(|t| t.param(name))
                .filter_map(|v| distribution.to_internal(v))
                .collect()
        };
        let mut numeric = |low: f64, high: f64| {
            self.sample_numeric(low, high, &observations(good), &observations(bad), rng)
        };

        match distribution {
            Distribution::Uniform { low, high } => {
                ParamValue::Float(numeric(*low, *high).clamp(*low, *high))
            }
            Distribution::LogUniform { low, high } => {
                ParamValue::Float(numeric(low.ln(), high.ln()).exp().clamp(*low, *high))
            }
            Distribution::Int { low, high } => {
                ParamValue::Int(nearest_int(numeric(*low as f64, *high as f64), *low, *high))
            }
            Distribution::Choice(values) => {
                let indices = |group: &[&Trial]| -> Vec<usize> {
                    group
                        .iter()
                        .filter_map(|t| t.param(name))
                        .filter_map(|v| distribution.choice_index(v))
                        .collect()
                };
                let idx = self.sample_choice(values.len(), &indices(good), &indices(bad), rng);
                values[idx].clone()
            }
        }
    }

    /// Returns the internal-space candidate with the best density ratio.
    ///
    /// A collapsed interval (`Int` with `low == high`, or log bounds that
    /// round to the same value) yields `low`.
    fn sample_numeric(
        &self,
        low: f64,
        high: f64,
        good: &[f64],
        bad: &[f64],
        rng: &mut fastrand::Rng,
    ) -> f64 {
        if low >= high {
            return low;
        }
        let l = ParzenEstimator::fit(good, low, high, self.config.prior_weight);
        let g = ParzenEstimator::fit(bad, low, high, self.config.prior_weight);

        let mut best: Option<(f64, f64)> = None;
        for _ in 0..self.config.n_candidates {
            let candidate = l.sample(rng);
            let score = l.log_pdf(candidate) - g.log_pdf(candidate);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best.map_or(0.5 * (low + high), |(x, _)| x)
    }

    /// Returns the choice index with the best probability ratio.
    fn sample_choice(
        &self,
        n_choices: usize,
        good: &[usize],
        bad: &[usize],
        rng: &mut fastrand::Rng,
    ) -> usize {
        let l = CategoricalEstimator::fit(good, n_choices, self.config.prior_weight);
        let g = CategoricalEstimator::fit(bad, n_choices, self.config.prior_weight);

        let mut best: Option<(usize, f64)> = None;
        for _ in 0..self.config.n_candidates {
            let candidate = l.sample(rng);
            let score = l.log_pmf(candidate) - g.log_pmf(candidate);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best.map_or(0, |(k, _)| k)
    }
}
