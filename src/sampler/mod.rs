//! The TPE sampler and its configuration.
//!
//! | Type | Role |
//! |------|------|
//! | [`TpeConfig`] | Validated, immutable settings (direction, gamma, `min_obs`, ...). |
//! | [`TpeConfigBuilder`] | Fluent construction of a [`TpeConfig`]. |
//! | [`HistoryPolicy`] | Whether stale history entries are skipped or rejected. |
//! | [`TpeSampler`] | Proposes the next parameter assignment. |
//!
//! # Examples
//!
//! ```
//! use parzen::sampler::{TpeConfig, TpeSampler};
//! use parzen::{SearchSpace, TrialHistory};
//!
//! let space = SearchSpace::new().log_uniform("lr", 1e-5, 1e-1);
//! let sampler = TpeSampler::new(TpeConfig::builder().seed(1).build().unwrap(), space).unwrap();
//!
//! let history = TrialHistory::new();
//! let (params, _next) = sampler.next_from(&history, 0).unwrap();
//! let lr = params["lr"].as_f64().unwrap();
//! assert!((1e-5..=1e-1).contains(&lr));
//! ```

mod config;
mod partition;
mod prior;
mod tpe;

pub use config::{HistoryPolicy, TpeConfig, TpeConfigBuilder};
pub use tpe::TpeSampler;
