//! Parameter distribution types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SpaceDefect};
use crate::param::ParamValue;

/// The prior distribution of a single parameter.
///
/// Construction does not validate; [`validate`](Self::validate) runs when
/// a sampler first proposes values for a space containing the
/// distribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distribution {
    /// Uniform over `[low, high]`.
    Uniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
    /// Uniform in log space over `[low, high]`, `low > 0`.
    LogUniform {
        /// Lower bound (inclusive).
        low: f64,
        /// Upper bound (inclusive).
        high: f64,
    },
    /// Discrete uniform over the integers in `[low, high]`.
    Int {
        /// Lower bound (inclusive).
        low: i64,
        /// Upper bound (inclusive).
        high: i64,
    },
    /// Uniform over an ordered list of opaque values.
    Choice(Vec<ParamValue>),
}

impl Distribution {
    /// Shorthand for [`Distribution::Uniform`].
    #[must_use]
    pub fn uniform(low: f64, high: f64) -> Self {
        Distribution::Uniform { low, high }
    }

    /// Shorthand for [`Distribution::LogUniform`].
    #[must_use]
    pub fn log_uniform(low: f64, high: f64) -> Self {
        Distribution::LogUniform { low, high }
    }

    /// Shorthand for [`Distribution::Int`].
    #[must_use]
    pub fn int(low: i64, high: i64) -> Self {
        Distribution::Int { low, high }
    }

    /// Builds a [`Distribution::Choice`] from anything convertible to
    /// [`ParamValue`].
    ///
    /// ```
    /// use parzen::{Distribution, ParamValue};
    ///
    /// let d = Distribution::choice([Some("sqrt"), Some("log2"), None]);
    /// assert!(d.contains(&ParamValue::Null));
    /// ```
    #[must_use]
    pub fn choice<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Distribution::Choice(values.into_iter().map(Into::into).collect())
    }

    /// Checks the bounds or choice list.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSpace` naming `name` if bounds are non-finite
    /// or inverted, their width overflows, a log-uniform lower bound is not positive, or a choice
    /// list is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self, name: &str) -> Result<()> {
        let defect = match self {
            Distribution::Uniform { low, high } => continuous_defect(*low, *high),
            Distribution::LogUniform { low, high } => {
                continuous_defect(*low, *high).or_else(|| {
                    (*low <= 0.0).then_some(SpaceDefect::NonPositiveLogBound(*low))
                })
            }
            Distribution::Int { low, high } => (low > high).then(|| SpaceDefect::InvertedBounds {
                low: *low as f64,
                high: *high as f64,
            }),
            Distribution::Choice(values) => values.is_empty().then_some(SpaceDefect::EmptyChoices),
        };

        match defect {
            Some(defect) => Err(Error::InvalidSpace {
                name: name.to_string(),
                defect,
            }),
            None => Ok(()),
        }
    }

    /// Returns `true` if `value` has the right kind and lies within the
    /// bounds, or equals one of the declared choices.
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Distribution::Uniform { low, high }, ParamValue::Float(v))
            | (Distribution::LogUniform { low, high }, ParamValue::Float(v)) => {
                (*low..=*high).contains(v)
            }
            (Distribution::Int { low, high }, ParamValue::Int(v)) => (*low..=*high).contains(v),
            (Distribution::Choice(values), v) => values.contains(v),
            _ => false,
        }
    }

    /// Returns the index of `value` among the declared choices.
    pub(crate) fn choice_index(&self, value: &ParamValue) -> Option<usize> {
        match self {
            Distribution::Choice(values) => values.iter().position(|c| c == value),
            _ => None,
        }
    }
}

/// Rounds an internal-space value to the nearest integer in `[low, high]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn nearest_int(value: f64, low: i64, high: i64) -> i64 {
    let rounded = value.round().clamp(low as f64, high as f64) as i64;
    rounded.clamp(low, high)
}

fn continuous_defect(low: f64, high: f64) -> Option<SpaceDefect> {
    if !low.is_finite() || !high.is_finite() {
        Some(SpaceDefect::NonFiniteBound)
    } else if low >= high {
        Some(SpaceDefect::InvertedBounds { low, high })
    } else if !(high - low).is_finite() {
        Some(SpaceDefect::NonFiniteRange { low, high })
    } else {
        None
    }
}
