/// Smoothed frequency model over the indices of a choice list.
///
/// Each declared choice gets one Laplace pseudo-count plus an equal share
/// of the prior weight, so every choice keeps non-zero mass:
/// `p_k = (c_k + 1 + w / K) / (n + K + w)`.
#[derive(Clone, Debug)]
pub(crate) struct CategoricalEstimator {
    log_probs: Vec<f64>,
    cumulative: Vec<f64>,
}

impl CategoricalEstimator {
    /// Fits the model from observed choice indices. Indices outside
    /// `0..n_choices` are ignored.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn fit(indices: &[usize], n_choices: usize, prior_weight: f64) -> Self {
        debug_assert!(n_choices > 0, "CategoricalEstimator needs at least one choice");

        let mut counts = vec![0usize; n_choices];
        for &idx in indices {
            if let Some(c) = counts.get_mut(idx) {
                *c += 1;
            }
        }

        let k = n_choices as f64;
        let n = counts.iter().sum::<usize>() as f64;
        let denominator = n + k + prior_weight;
        let pseudo = 1.0 + prior_weight / k;

        let probs: Vec<f64> = counts
            .iter()
            .map(|&c| (c as f64 + pseudo) / denominator)
            .collect();

        let cumulative = probs
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p;
                Some(*acc)
            })
            .collect();

        Self {
            log_probs: probs.iter().map(|p| p.ln()).collect(),
            cumulative,
        }
    }

    /// Log probability of choice `index`; `-inf` if out of range.
    pub(crate) fn log_pmf(&self, index: usize) -> f64 {
        self.log_probs.get(index).copied().unwrap_or(f64::NEG_INFINITY)
    }

    /// Draws a choice index.
    pub(crate) fn sample(&self, rng: &mut fastrand::Rng) -> usize {
        let threshold = rng.f64() * self.cumulative.last().copied().unwrap_or(1.0);
        self.cumulative
            .iter()
            .position(|&c| threshold < c)
            .unwrap_or(self.cumulative.len() - 1)
    }
}
