#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Tree-structured Parzen Estimator (TPE) sampling and median pruning for
//! black-box hyperparameter search.
//!
//! Given a declarative search space and the history of evaluated trials,
//! [`TpeSampler`](sampler::TpeSampler) proposes the next parameter
//! assignment to try, and a [`PruningReporter`](pruner::PruningReporter)
//! advises stopping unpromising trials early. Running objectives,
//! storing results and coordinating workers are left to the caller.
//!
//! # Getting Started
//!
//! ```
//! use parzen::prelude::*;
//!
//! let space = SearchSpace::new()
//!     .uniform("x", -10.0, 10.0)
//!     .int("n", 1, 5);
//! let config = TpeConfig::builder().min_obs(8).seed(7).build().unwrap();
//! let mut sampler = TpeSampler::new(config, space).unwrap();
//!
//! let history = TrialHistory::new();
//! for _ in 0..40 {
//!     let id = history.next_trial_id();
//!     let (params, next) = sampler.next_from(&history, id).unwrap();
//!     let x = params["x"].as_f64().unwrap();
//!     history.push(Trial::succeeded(id, params, (x - 3.0).powi(2)).unwrap()).unwrap();
//!     sampler = next;
//! }
//!
//! let best = history.best_trial(Direction::Minimize).unwrap();
//! assert!(best.score().unwrap() < 100.0);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Distribution`] | Prior of one parameter: uniform, log-uniform, integer, or choice. |
//! | [`SearchSpace`] | Named distributions; [`SearchSpaceFn`] makes them depend on the trial index. |
//! | [`Trial`] | One finished (or running) evaluation with its parameters and score. |
//! | [`TrialHistory`] | Shared, append-only log of trials. |
//! | [`TpeSampler`](sampler::TpeSampler) | Proposes parameters; bootstrap from priors, then TPE. |
//! | [`PruningReporter`](pruner::PruningReporter) | Tracks intermediate values and asks a [`Pruner`](pruner::Pruner). |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on spaces, trials, and [`TpeConfig`](sampler::TpeConfig) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for sampling modes, skipped history entries, and prune recommendations | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod distribution;
mod error;
mod history;
mod kde;
mod param;
pub mod pruner;
mod rng_util;
pub mod sampler;
mod space;
mod trial;
mod types;

pub use distribution::Distribution;
pub use error::{Error, HistoryIssue, Result, SpaceDefect};
pub use history::TrialHistory;
pub use param::ParamValue;
pub use space::{SearchSpace, SearchSpaceFn};
pub use trial::{Params, Trial};
pub use types::{Direction, TrialStatus};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use parzen::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distribution::Distribution;
    pub use crate::error::{Error, HistoryIssue, Result, SpaceDefect};
    pub use crate::history::TrialHistory;
    pub use crate::param::ParamValue;
    pub use crate::pruner::{MedianPruner, NopPruner, PercentilePruner, Pruner, PruningReporter};
    pub use crate::sampler::{HistoryPolicy, TpeConfig, TpeConfigBuilder, TpeSampler};
    pub use crate::space::{SearchSpace, SearchSpaceFn};
    pub use crate::trial::{Params, Trial};
    pub use crate::types::{Direction, TrialStatus};
}
