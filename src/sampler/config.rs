//! Sampler configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Direction;

/// How the sampler treats history entries that no longer fit the search
/// space of the trial being proposed.
///
/// An entry does not fit when its parameter name is absent from the
/// current space, or when its value has the wrong kind, lies outside the
/// declared bounds, or is not one of the declared choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HistoryPolicy {
    /// Skip non-fitting entries and model the rest.
    #[default]
    Lenient,
    /// Fail with [`Error::InconsistentHistory`] on the first non-fitting
    /// entry.
    Strict,
}

/// Immutable TPE configuration.
///
/// | Field | Default | Constraint |
/// |-------|---------|------------|
/// | `direction` | `Minimize` | |
/// | `gamma` | 0.25 | `0 < gamma < 1` |
/// | `min_obs` | 10 | `>= 1` |
/// | `n_candidates` | 24 | `>= 1` |
/// | `seed` | `None` | |
/// | `prior_weight` | 1.0 | positive, finite |
/// | `history_policy` | `Lenient` | |
///
/// With the `serde` feature every field is optional when deserializing;
/// missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use parzen::sampler::TpeConfig;
///
/// let config = TpeConfig::builder()
///     .maximize()
///     .gamma(0.2)
///     .min_obs(8)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.min_obs, 8);
/// assert!(TpeConfig::builder().gamma(1.5).build().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TpeConfig {
    /// Whether lower or higher scores are better.
    pub direction: Direction,
    /// Fraction of succeeded trials treated as good.
    pub gamma: f64,
    /// Succeeded trials required before the density model is used.
    pub min_obs: usize,
    /// Candidates drawn from the good density per parameter.
    pub n_candidates: usize,
    /// Seed for reproducible proposals; drawn once at sampler
    /// construction when absent.
    pub seed: Option<u64>,
    /// Weight of the prior component against a weight of 1 per
    /// observation.
    pub prior_weight: f64,
    /// Treatment of history entries that do not fit the current space.
    pub history_policy: HistoryPolicy,
}

impl Default for TpeConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Minimize,
            gamma: 0.25,
            min_obs: 10,
            n_candidates: 24,
            seed: None,
            prior_weight: 1.0,
            history_policy: HistoryPolicy::Lenient,
        }
    }
}

impl TpeConfig {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> TpeConfigBuilder {
        TpeConfigBuilder::new()
    }

    /// Checks every constraint.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGamma` if gamma is not in (0.0, 1.0),
    /// `Error::InvalidMinObs` or `Error::InvalidCandidates` for zero counts,
    /// and `Error::InvalidPriorWeight` for a prior weight that is not
    /// positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.gamma > 0.0 && self.gamma < 1.0) {
            return Err(Error::InvalidGamma(self.gamma));
        }
        if self.min_obs == 0 {
            return Err(Error::InvalidMinObs);
        }
        if self.n_candidates == 0 {
            return Err(Error::InvalidCandidates);
        }
        if !(self.prior_weight.is_finite() && self.prior_weight > 0.0) {
            return Err(Error::InvalidPriorWeight(self.prior_weight));
        }
        Ok(())
    }
}

/// Builder for [`TpeConfig`].
///
/// Validation happens at [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct TpeConfigBuilder {
    config: TpeConfig,
}

impl TpeConfigBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the optimization direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Shorthand for `direction(Direction::Minimize)`.
    #[must_use]
    pub fn minimize(self) -> Self {
        self.direction(Direction::Minimize)
    }

    /// Shorthand for `direction(Direction::Maximize)`.
    #[must_use]
    pub fn maximize(self) -> Self {
        self.direction(Direction::Maximize)
    }

    /// Sets the good fraction, in (0.0, 1.0).
    ///
    /// A gamma of 0.25 treats the best quarter of succeeded trials as
    /// good.
    #[must_use]
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.config.gamma = gamma;
        self
    }

    /// Sets how many succeeded trials are required before modeling.
    #[must_use]
    pub fn min_obs(mut self, min_obs: usize) -> Self {
        self.config.min_obs = min_obs;
        self
    }

    /// Sets how many candidates are scored per parameter.
    #[must_use]
    pub fn n_candidates(mut self, n_candidates: usize) -> Self {
        self.config.n_candidates = n_candidates;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Sets the prior component weight.
    #[must_use]
    pub fn prior_weight(mut self, prior_weight: f64) -> Self {
        self.config.prior_weight = prior_weight;
        self
    }

    /// Sets the history policy.
    #[must_use]
    pub fn history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.config.history_policy = policy;
        self
    }

    /// Shorthand for `history_policy(HistoryPolicy::Strict)`.
    #[must_use]
    pub fn strict(self) -> Self {
        self.history_policy(HistoryPolicy::Strict)
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint; see
    /// [`TpeConfig::validate`].
    pub fn build(self) -> Result<TpeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
