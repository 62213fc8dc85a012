use crate::types::TrialStatus;

/// Errors returned by sampler construction, proposal, and record validation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a distribution in the search space is malformed.
    #[error("invalid search space: parameter '{name}': {defect}")]
    InvalidSpace {
        /// The name of the offending parameter.
        name: String,
        /// What is wrong with its distribution.
        defect: SpaceDefect,
    },

    /// Returned in strict mode when a completed trial does not fit the
    /// search space of the current trial index.
    #[error("inconsistent history: trial {trial_id}, parameter '{name}': {issue}")]
    InconsistentHistory {
        /// The id of the trial carrying the parameter.
        trial_id: u64,
        /// The parameter name found in the trial.
        name: String,
        /// Why the entry does not fit.
        issue: HistoryIssue,
    },

    /// Returned when gamma is not in the valid range (0.0, 1.0).
    #[error("invalid gamma: {0} must be in (0.0, 1.0)")]
    InvalidGamma(f64),

    /// Returned when `min_obs` is zero.
    #[error("invalid min_obs: at least one observation is required")]
    InvalidMinObs,

    /// Returned when `n_candidates` is zero.
    #[error("invalid n_candidates: at least one candidate is required")]
    InvalidCandidates,

    /// Returned when the prior weight is not a positive finite number.
    #[error("invalid prior weight: {0} must be positive and finite")]
    InvalidPriorWeight(f64),

    /// Returned when a succeeded trial is built with a NaN or infinite score.
    #[error("trial {trial_id} has a non-finite score")]
    NonFiniteScore {
        /// The id of the trial.
        trial_id: u64,
    },

    /// Returned when a deserialized trial carries a score its status does
    /// not allow, or a succeeded trial has none.
    #[error("trial {trial_id}: score does not match status {status:?}")]
    ScoreMismatch {
        /// The id of the trial.
        trial_id: u64,
        /// The recorded status.
        status: TrialStatus,
    },

    /// Returned when an intermediate report does not advance the step.
    #[error("trial {trial_id}: step {step} must be greater than the last reported step {last_step}")]
    NonIncreasingStep {
        /// The id of the reporting trial.
        trial_id: u64,
        /// The rejected step.
        step: u64,
        /// The last step accepted for this trial.
        last_step: u64,
    },

    /// Returned when an intermediate report carries a NaN or infinite value.
    #[error("trial {trial_id}: non-finite value reported at step {step}")]
    NonFiniteReport {
        /// The id of the reporting trial.
        trial_id: u64,
        /// The step of the rejected report.
        step: u64,
    },

    /// Returned when a trial id is appended to the history twice.
    #[error("trial {0} is already recorded in the history")]
    DuplicateTrial(u64),
}

/// The specific defect found in a [`Distribution`](crate::Distribution).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpaceDefect {
    /// The lower bound is not below the upper bound.
    #[error("low ({low}) must be less than high ({high})")]
    InvertedBounds {
        /// The lower bound.
        low: f64,
        /// The upper bound.
        high: f64,
    },

    /// A bound is NaN or infinite.
    #[error("bounds must be finite")]
    NonFiniteBound,

    /// The bounds are finite but `high - low` overflows.
    #[error("range from {low} to {high} is too wide to represent")]
    NonFiniteRange {
        /// The lower bound.
        low: f64,
        /// The upper bound.
        high: f64,
    },

    /// A log-uniform lower bound is zero or negative.
    #[error("log-uniform low ({0}) must be positive")]
    NonPositiveLogBound(f64),

    /// A choice list has no values.
    #[error("choice list cannot be empty")]
    EmptyChoices,
}

/// Why a history entry does not fit the current search space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HistoryIssue {
    /// The name is absent from the current space.
    #[error("not part of the current search space")]
    UnknownParameter,

    /// The value has the wrong kind, lies outside the bounds, or is not a
    /// declared choice.
    #[error("value does not match the declared distribution")]
    ValueMismatch,
}

pub type Result<T> = core::result::Result<T, Error>;
