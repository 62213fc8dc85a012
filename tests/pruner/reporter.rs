use std::sync::Arc;
use std::thread;

use parzen::pruner::{MedianPruner, NopPruner, PercentilePruner, PruningReporter};
use parzen::{Direction, Error, Params, Trial};

fn maximize_reporter() -> PruningReporter<MedianPruner> {
    PruningReporter::new(MedianPruner::new(Direction::Maximize).n_warmup_steps(1))
}

#[test]
fn fourth_trial_below_median_is_pruned() {
    let reporter = maximize_reporter();
    for (id, value) in [(0, 0.9), (1, 0.5), (2, 0.1)] {
        reporter.report(id, 5, value).unwrap();
    }

    reporter.report(3, 5, 0.05).unwrap();
    assert!(reporter.should_prune(3));
}

#[test]
fn fourth_trial_above_median_is_kept() {
    let reporter = maximize_reporter();
    for (id, value) in [(0, 0.9), (1, 0.5), (2, 0.1)] {
        reporter.report(id, 5, value).unwrap();
    }

    reporter.report(3, 5, 0.95).unwrap();
    assert!(!reporter.should_prune(3));
}

#[test]
fn warmup_step_is_respected() {
    let reporter = maximize_reporter();
    reporter.report(0, 0, 0.9).unwrap();
    reporter.report(1, 0, 0.0).unwrap();
    assert!(!reporter.should_prune(1));
}

#[test]
fn trial_is_compared_at_its_latest_step() {
    let reporter = PruningReporter::new(MedianPruner::new(Direction::Minimize));
    reporter.report(0, 1, 1.0).unwrap();
    reporter.report(0, 2, 0.5).unwrap();

    reporter.report(1, 1, 0.1).unwrap();
    assert!(!reporter.should_prune(1));
    reporter.report(1, 2, 0.8).unwrap();
    assert!(reporter.should_prune(1));
}

#[test]
fn peers_that_stopped_earlier_are_ignored() {
    let reporter = PruningReporter::new(MedianPruner::new(Direction::Minimize));
    reporter.report(0, 1, 0.1).unwrap();
    reporter.report(1, 1, 5.0).unwrap();
    reporter.report(1, 2, 5.0).unwrap();
    // Trial 0 never reached step 2.
    assert!(!reporter.should_prune(1));
}

#[test]
fn reports_are_validated() {
    let reporter = PruningReporter::new(NopPruner);
    reporter.report(7, 3, 1.0).unwrap();
    assert!(matches!(
        reporter.report(7, 2, 1.0),
        Err(Error::NonIncreasingStep {
            trial_id: 7,
            step: 2,
            last_step: 3
        })
    ));
    assert!(matches!(
        reporter.report(7, 4, f64::INFINITY),
        Err(Error::NonFiniteReport { trial_id: 7, step: 4 })
    ));
    assert_eq!(reporter.intermediate_values(7), vec![(3, 1.0)]);
}

#[test]
fn nop_pruner_never_prunes() {
    let reporter = PruningReporter::new(NopPruner);
    reporter.report(0, 1, 0.0).unwrap();
    reporter.report(1, 1, 1e9).unwrap();
    assert!(!reporter.should_prune(1));
}

#[test]
fn percentile_pruner_through_reporter() {
    let reporter = PruningReporter::new(PercentilePruner::new(25.0, Direction::Minimize));
    for (id, value) in [(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)] {
        reporter.report(id, 0, value).unwrap();
    }
    reporter.report(4, 0, 2.5).unwrap();
    assert!(reporter.should_prune(4));
}

#[test]
fn history_trials_serve_as_peers() {
    let finished: Vec<Trial> = [(0, 0.9), (1, 0.5), (2, 0.1)]
        .into_iter()
        .map(|(id, v)| {
            Trial::succeeded(id, Params::new(), v)
                .unwrap()
                .with_intermediate_values(vec![(1, v), (5, v)])
                .unwrap()
        })
        .collect();

    let reporter = PruningReporter::with_history(
        MedianPruner::new(Direction::Maximize).n_warmup_steps(1),
        &finished,
    );
    assert_eq!(reporter.reported_trials(), vec![0, 1, 2]);

    reporter.report(3, 5, 0.05).unwrap();
    assert!(reporter.should_prune(3));
}

#[test]
fn concurrent_reports_from_many_trials() {
    let reporter = Arc::new(PruningReporter::new(MedianPruner::new(Direction::Minimize)));

    thread::scope(|scope| {
        for id in 0..8u64 {
            let reporter = Arc::clone(&reporter);
            scope.spawn(move || {
                for step in 0..50u64 {
                    reporter.report(id, step, id as f64).unwrap();
                    let _ = reporter.should_prune(id);
                }
            });
        }
    });

    assert_eq!(reporter.reported_trials().len(), 8);
    for id in 0..8 {
        assert_eq!(reporter.intermediate_values(id).len(), 50);
    }
    // Peers at step 49 are 0..=7 except the trial itself.
    assert!(reporter.should_prune(7));
    assert!(!reporter.should_prune(0));
}
