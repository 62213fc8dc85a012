//! Trial records.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::types::TrialStatus;

/// A parameter assignment, keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

/// A single evaluation of the objective function.
///
/// Trials are immutable value records; build them with the constructor
/// matching their final status. Only [`Succeeded`](TrialStatus::Succeeded)
/// trials inform the sampler.
///
/// # Examples
///
/// ```
/// use parzen::{Params, ParamValue, Trial, TrialStatus};
///
/// let mut params = Params::new();
/// params.insert("x".to_string(), ParamValue::Float(0.3));
///
/// let trial = Trial::succeeded(0, params, 1.25).unwrap();
/// assert_eq!(trial.status(), TrialStatus::Succeeded);
/// assert_eq!(trial.score(), Some(1.25));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TrialRecord"))]
pub struct Trial {
    id: u64,
    params: Params,
    score: Option<f64>,
    status: TrialStatus,
    intermediate_values: Vec<(u64, f64)>,
}

/// Unchecked wire form of a [`Trial`]; converting it runs the same checks
/// as the constructors.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TrialRecord {
    id: u64,
    params: Params,
    score: Option<f64>,
    status: TrialStatus,
    #[serde(default)]
    intermediate_values: Vec<(u64, f64)>,
}

#[cfg(feature = "serde")]
impl TryFrom<TrialRecord> for Trial {
    type Error = Error;

    fn try_from(record: TrialRecord) -> Result<Self> {
        let TrialRecord {
            id,
            params,
            score,
            status,
            intermediate_values,
        } = record;
        let trial = match (status, score) {
            (TrialStatus::Succeeded, Some(score)) => Trial::succeeded(id, params, score)?,
            (TrialStatus::Pruned, score) => {
                if score.is_some_and(|s| !s.is_finite()) {
                    return Err(Error::NonFiniteScore { trial_id: id });
                }
                Trial::pruned(id, params, score)
            }
            (TrialStatus::Running, None) => Trial::running(id, params),
            (TrialStatus::Failed, None) => Trial::failed(id, params),
            (status, _) => return Err(Error::ScoreMismatch { trial_id: id, status }),
        };
        trial.with_intermediate_values(intermediate_values)
    }
}

impl Trial {
    fn with_status(id: u64, params: Params, score: Option<f64>, status: TrialStatus) -> Self {
        Self {
            id,
            params,
            score,
            status,
            intermediate_values: Vec::new(),
        }
    }

    /// A trial whose objective is still being evaluated.
    #[must_use]
    pub fn running(id: u64, params: Params) -> Self {
        Self::with_status(id, params, None, TrialStatus::Running)
    }

    /// A trial whose objective returned `score`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NonFiniteScore` if `score` is NaN or infinite.
    pub fn succeeded(id: u64, params: Params, score: f64) -> Result<Self> {
        if !score.is_finite() {
            return Err(Error::NonFiniteScore { trial_id: id });
        }
        Ok(Self::with_status(
            id,
            params,
            Some(score),
            TrialStatus::Succeeded,
        ))
    }

    /// A trial whose objective failed.
    #[must_use]
    pub fn failed(id: u64, params: Params) -> Self {
        Self::with_status(id, params, None, TrialStatus::Failed)
    }

    /// A trial stopped early, optionally carrying its last reported value.
    #[must_use]
    pub fn pruned(id: u64, params: Params, last_value: Option<f64>) -> Self {
        Self::with_status(id, params, last_value, TrialStatus::Pruned)
    }

    /// Attaches the `(step, value)` reports produced while the trial ran.
    ///
    /// # Errors
    ///
    /// Returns `Error::NonIncreasingStep` if steps are not strictly
    /// increasing, or `Error::NonFiniteReport` for a NaN or infinite value.
    pub fn with_intermediate_values(mut self, values: Vec<(u64, f64)>) -> Result<Self> {
        let mut last: Option<u64> = None;
        for &(step, value) in &values {
            if let Some(last_step) = last
                && step <= last_step
            {
                return Err(Error::NonIncreasingStep {
                    trial_id: self.id,
                    step,
                    last_step,
                });
            }
            if !value.is_finite() {
                return Err(Error::NonFiniteReport {
                    trial_id: self.id,
                    step,
                });
            }
            last = Some(step);
        }
        self.intermediate_values = values;
        Ok(self)
    }

    /// Returns the unique id of this trial.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the parameter assignment.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns one parameter value.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Returns the score, if any.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> TrialStatus {
        self.status
    }

    /// Returns `true` for a succeeded trial with a score.
    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        self.status == TrialStatus::Succeeded && self.score.is_some()
    }

    /// Returns the intermediate `(step, value)` reports, in step order.
    #[must_use]
    pub fn intermediate_values(&self) -> &[(u64, f64)] {
        &self.intermediate_values
    }
}
