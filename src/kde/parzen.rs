//! Truncated Gaussian mixture used as the numeric density model.
//!
//! Each observation contributes one Gaussian kernel with its own
//! bandwidth; one extra low-weight component spanning the whole range acts
//! as a prior so that the density is positive everywhere in
//! `[low, high]`. Every component is renormalized to the bounded interval.

use crate::rng_util;

/// Upper bound on the divisor of the range-fraction bandwidth floor.
const MAX_FLOOR_DIVISOR: f64 = 100.0;

/// Rejection attempts before a draw falls back to its kernel centre.
const MAX_REJECTIONS: usize = 64;

/// Smallest probability mass a component may keep after truncation.
const MIN_MASS: f64 = 1e-12;

/// A Parzen-window density estimator over a bounded interval.
///
/// Kernel bandwidths follow
/// `max(default, nearest neighbour distance, range / min(100, n + 1))`,
/// capped at the range, where the default is Scott's rule
/// (`n^(-1/5) * std_dev`) and falls back to the full range when fewer than
/// two observations exist.
#[derive(Clone, Debug)]
pub(crate) struct ParzenEstimator {
    low: f64,
    high: f64,
    mus: Vec<f64>,
    sigmas: Vec<f64>,
    /// Normalized mixture weights (observations first, prior last).
    weights: Vec<f64>,
    /// `ln(w) - ln(mass) - ln(sigma) - ln(sqrt(2 pi))` per component.
    log_coefficients: Vec<f64>,
}

impl ParzenEstimator {
    /// Fits the estimator to `observations`, which must lie in
    /// `[low, high]` with `low < high`.
    ///
    /// An empty slice yields the prior alone.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn fit(observations: &[f64], low: f64, high: f64, prior_weight: f64) -> Self {
        debug_assert!(low < high, "ParzenEstimator needs a non-empty interval");

        let range = high - low;
        let n = observations.len();
        let default = Self::default_bandwidth(observations, range);
        let floor = range / (n as f64 + 1.0).min(MAX_FLOOR_DIVISOR);
        let neighbour = nearest_neighbour_distances(observations);

        let mut mus = Vec::with_capacity(n + 1);
        let mut sigmas = Vec::with_capacity(n + 1);
        let mut weights = Vec::with_capacity(n + 1);
        for (&x, &d) in observations.iter().zip(&neighbour) {
            mus.push(x);
            sigmas.push(default.max(d).max(floor).min(range));
            weights.push(1.0);
        }

        mus.push(0.5 * (low + high));
        sigmas.push(range);
        weights.push(prior_weight);

        let total: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= total;
        }

        let half_log_2pi = 0.5 * (2.0 * core::f64::consts::PI).ln();
        let log_coefficients = mus
            .iter()
            .zip(&sigmas)
            .zip(&weights)
            .map(|((&mu, &sigma), &w)| {
                let mass = norm_cdf((high - mu) / sigma) - norm_cdf((low - mu) / sigma);
                w.ln() - mass.max(MIN_MASS).ln() - sigma.ln() - half_log_2pi
            })
            .collect();

        Self {
            low,
            high,
            mus,
            sigmas,
            weights,
            log_coefficients,
        }
    }

    /// Scott's rule, or the full range for fewer than two observations.
    #[allow(clippy::cast_precision_loss)]
    fn default_bandwidth(observations: &[f64], range: f64) -> f64 {
        if observations.len() < 2 {
            return range;
        }
        let n = observations.len() as f64;
        let mean = observations.iter().sum::<f64>() / n;
        let variance = observations.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        n.powf(-0.2) * variance.sqrt()
    }

    /// Log density at `x`; `-inf` outside the interval.
    pub(crate) fn log_pdf(&self, x: f64) -> f64 {
        if !(self.low..=self.high).contains(&x) {
            return f64::NEG_INFINITY;
        }

        let terms = self
            .mus
            .iter()
            .zip(&self.sigmas)
            .zip(&self.log_coefficients)
            .map(|((&mu, &sigma), &c)| {
                let z = (x - mu) / sigma;
                c - 0.5 * z * z
            });
        log_sum_exp(terms)
    }

    /// Draws a value from the truncated mixture.
    pub(crate) fn sample(&self, rng: &mut fastrand::Rng) -> f64 {
        let j = self.pick_component(rng);
        let (mu, sigma) = (self.mus[j], self.sigmas[j]);
        for _ in 0..MAX_REJECTIONS {
            let x = mu + sigma * rng_util::standard_normal(rng);
            if (self.low..=self.high).contains(&x) {
                return x;
            }
        }
        mu.clamp(self.low, self.high)
    }

    fn pick_component(&self, rng: &mut fastrand::Rng) -> usize {
        let threshold = rng.f64();
        let mut cumulative = 0.0;
        for (j, &w) in self.weights.iter().enumerate() {
            cumulative += w;
            if threshold < cumulative {
                return j;
            }
        }
        self.weights.len() - 1
    }

    #[cfg(test)]
    pub(crate) fn bandwidths(&self) -> &[f64] {
        &self.sigmas
    }

    #[cfg(test)]
    pub(crate) fn weights(&self) -> &[f64] {
        &self.weights
    }
}

/// Distance from each observation to its closest other observation, in
/// input order. Zero when there is no other observation.
fn nearest_neighbour_distances(observations: &[f64]) -> Vec<f64> {
    let n = observations.len();
    let mut distances = vec![0.0; n];
    if n < 2 {
        return distances;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| observations[a].total_cmp(&observations[b]));

    for (pos, &i) in order.iter().enumerate() {
        let left = pos
            .checked_sub(1)
            .map(|p| observations[i] - observations[order[p]]);
        let right = order.get(pos + 1).map(|&r| observations[r] - observations[i]);
        distances[i] = match (left, right) {
            (Some(l), Some(r)) => l.min(r),
            (Some(d), None) | (None, Some(d)) => d,
            (None, None) => 0.0,
        };
    }
    distances
}

fn log_sum_exp(terms: impl Iterator<Item = f64> + Clone) -> f64 {
    let max = terms.clone().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    max + terms.map(|t| (t - max).exp()).sum::<f64>().ln()
}

/// Standard normal PDF.
fn norm_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF (Abramowitz-Stegun rational approximation).
fn norm_cdf(x: f64) -> f64 {
    if x < -8.0 {
        return 0.0;
    }
    if x > 8.0 {
        return 1.0;
    }

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * abs_x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly = 0.319_381_530 * t - 0.356_563_782 * t2 + 1.781_477_937 * t3 - 1.821_255_978 * t4
        + 1.330_274_429 * t5;
    let cdf = 1.0 - norm_pdf(abs_x) * poly;

    if x >= 0.0 { cdf } else { 1.0 - cdf }
}
