//! Good/bad split of succeeded trials.

use crate::trial::Trial;
use crate::types::Direction;

/// Splits `completed` (succeeded trials in completion order) into the best
/// `gamma` fraction and the rest.
///
/// `n_good = clamp(ceil(gamma * n), 1, max(n - 1, 1))`, so both sides are
/// non-empty whenever `n >= 2`. The sort is stable: equal scores keep
/// their completion order, so the earlier trial lands on the good side.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub(crate) fn split<'a>(
    completed: &[&'a Trial],
    direction: Direction,
    gamma: f64,
) -> (Vec<&'a Trial>, Vec<&'a Trial>) {
    let n = completed.len();
    if n == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut sorted = completed.to_vec();
    sorted.sort_by(|a, b| {
        direction.compare(
            a.score().unwrap_or(f64::NAN),
            b.score().unwrap_or(f64::NAN),
        )
    });

    let n_good = ((n as f64 * gamma).ceil() as usize).clamp(1, (n - 1).max(1));
    let bad = sorted.split_off(n_good);
    (sorted, bad)
}
