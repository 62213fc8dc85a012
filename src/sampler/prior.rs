//! Draws from the declared prior of a distribution.

use crate::distribution::Distribution;
use crate::param::ParamValue;
use crate::rng_util;

/// Samples a value from the prior of `distribution`: uniform, log-uniform,
/// discrete uniform over `[low, high]`, or uniform over the choices.
///
/// The distribution must already be validated.
pub(crate) fn sample_prior(distribution: &Distribution, rng: &mut fastrand::Rng) -> ParamValue {
    match distribution {
        Distribution::Uniform { low, high } => {
            ParamValue::Float(rng_util::f64_range(rng, *low, *high).clamp(*low, *high))
        }
        Distribution::LogUniform { low, high } => {
            let x = rng_util::f64_range(rng, low.ln(), high.ln()).exp();
            ParamValue::Float(x.clamp(*low, *high))
        }
        Distribution::Int { low, high } => ParamValue::Int(rng.i64(*low..=*high)),
        Distribution::Choice(values) => values[rng.usize(..values.len())].clone(),
    }
}
