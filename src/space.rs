//! Search space definitions.
//!
//! A [`SearchSpace`] maps parameter names to their [`Distribution`]s. The
//! sampler asks a [`SearchSpaceFn`] for the space of every trial index, so
//! spaces may change over the course of a search; a plain `SearchSpace`
//! is the constant case.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::Result;

/// An ordered mapping from parameter name to distribution.
///
/// Iteration is in name order, which keeps sampling reproducible.
///
/// # Examples
///
/// ```
/// use parzen::SearchSpace;
///
/// let space = SearchSpace::new()
///     .log_uniform("learning_rate", 1e-5, 1e-1)
///     .int("max_depth", 3, 20)
///     .choice("criterion", ["gini", "entropy"]);
///
/// assert_eq!(space.len(), 3);
/// assert!(space.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchSpace {
    params: BTreeMap<String, Distribution>,
}

impl SearchSpace {
    /// Creates an empty space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, distribution: Distribution) -> Self {
        self.insert(name, distribution);
        self
    }

    /// Adds a uniform float parameter.
    #[must_use]
    pub fn uniform(self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.with(name, Distribution::uniform(low, high))
    }

    /// Adds a log-uniform float parameter.
    #[must_use]
    pub fn log_uniform(self, name: impl Into<String>, low: f64, high: f64) -> Self {
        self.with(name, Distribution::log_uniform(low, high))
    }

    /// Adds an integer parameter.
    #[must_use]
    pub fn int(self, name: impl Into<String>, low: i64, high: i64) -> Self {
        self.with(name, Distribution::int(low, high))
    }

    /// Adds a choice parameter.
    #[must_use]
    pub fn choice<I, V>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<crate::ParamValue>,
    {
        self.with(name, Distribution::choice(values))
    }

    /// Inserts a parameter, returning the distribution it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        distribution: Distribution,
    ) -> Option<Distribution> {
        self.params.insert(name.into(), distribution)
    }

    /// Looks up a parameter's distribution.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Distribution> {
        self.params.get(name)
    }

    /// Returns `true` if the space declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if no parameters are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Distribution)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validates every distribution.
    ///
    /// # Errors
    ///
    /// Returns the first `Error::InvalidSpace` found, in name order.
    pub fn validate(&self) -> Result<()> {
        self.params
            .iter()
            .try_for_each(|(name, dist)| dist.validate(name))
    }
}

impl<S: Into<String>> FromIterator<(S, Distribution)> for SearchSpace {
    fn from_iter<I: IntoIterator<Item = (S, Distribution)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Produces the search space for a trial index.
///
/// Implementations must be pure: the same index always yields the same
/// space, because the sampler may ask more than once.
///
/// Closures implement this trait:
///
/// ```
/// use parzen::{SearchSpace, SearchSpaceFn};
///
/// // Widen the range once the first 50 trials are done.
/// let space = |index: u64| {
///     let high = if index < 50 { 1.0 } else { 10.0 };
///     SearchSpace::new().uniform("x", 0.0, high)
/// };
/// assert_eq!(space.space(60).len(), 1);
/// ```
pub trait SearchSpaceFn: Send + Sync {
    /// Returns the space used to sample trial `trial_index`.
    fn space(&self, trial_index: u64) -> SearchSpace;
}

impl<F> SearchSpaceFn for F
where
    F: Fn(u64) -> SearchSpace + Send + Sync,
{
    fn space(&self, trial_index: u64) -> SearchSpace {
        self(trial_index)
    }
}

impl SearchSpaceFn for SearchSpace {
    fn space(&self, _trial_index: u64) -> SearchSpace {
        self.clone()
    }
}
