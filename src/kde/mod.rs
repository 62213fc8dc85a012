//! Density models fitted to the good and bad partitions of the history.
//!
//! - [`parzen`] - Truncated Gaussian mixture for numeric parameters
//! - [`categorical`] - Smoothed frequencies for choice parameters

mod categorical;
mod parzen;

pub(crate) use categorical::CategoricalEstimator;
pub(crate) use parzen::ParzenEstimator;
