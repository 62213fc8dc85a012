#![allow(
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

mod history_policy;
mod tpe;

use parzen::sampler::{TpeConfig, TpeSampler};
use parzen::{ParamValue, Params, SearchSpaceFn, Trial};

/// Builds a seeded sampler with the given `min_obs`.
fn seeded(space: impl SearchSpaceFn + 'static, seed: u64, min_obs: usize) -> TpeSampler {
    let config = TpeConfig::builder()
        .seed(seed)
        .min_obs(min_obs)
        .build()
        .unwrap();
    TpeSampler::new(config, space).unwrap()
}

/// Builds a parameter map from `(name, value)` pairs.
fn params<const N: usize>(pairs: [(&str, ParamValue); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Runs `n` sequential proposals against `objective`, recording every
/// trial as succeeded, and returns the history.
fn run(
    mut sampler: TpeSampler,
    n: u64,
    objective: impl Fn(&Params) -> f64,
) -> Vec<Trial> {
    let mut history = Vec::new();
    for i in 0..n {
        let (p, next) = sampler.next(&history, i).unwrap();
        let score = objective(&p);
        history.push(Trial::succeeded(i, p, score).unwrap());
        sampler = next;
    }
    history
}

/// Best score in `history` for minimization.
fn best_min(history: &[Trial]) -> f64 {
    history
        .iter()
        .filter_map(Trial::score)
        .fold(f64::INFINITY, f64::min)
}
