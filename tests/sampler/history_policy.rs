use parzen::sampler::{HistoryPolicy, TpeConfig, TpeSampler};
use parzen::{Error, HistoryIssue, ParamValue, SearchSpace, Trial};

use super::params;

fn space() -> SearchSpace {
    SearchSpace::new()
        .uniform("x", 0.0, 1.0)
        .choice("c", ["a", "b"])
}

fn sampler(policy: HistoryPolicy) -> TpeSampler {
    let config = TpeConfig::builder()
        .seed(5)
        .min_obs(3)
        .history_policy(policy)
        .build()
        .unwrap();
    TpeSampler::new(config, space()).unwrap()
}

fn clean_history() -> Vec<Trial> {
    (0..6u64)
        .map(|i| {
            let x = i as f64 / 10.0;
            let c = if i % 2 == 0 { "a" } else { "b" };
            Trial::succeeded(
                i,
                params([("x", ParamValue::Float(x)), ("c", ParamValue::from(c))]),
                x,
            )
            .unwrap()
        })
        .collect()
}

fn with_extra(mut history: Vec<Trial>, trial: Trial) -> Vec<Trial> {
    history.push(trial);
    history
}

#[test]
fn test_lenient_skips_unknown_parameter() {
    let stale = Trial::succeeded(
        6,
        params([
            ("x", ParamValue::Float(0.6)),
            ("c", ParamValue::from("a")),
            ("removed", ParamValue::Int(3)),
        ]),
        0.6,
    )
    .unwrap();
    let plain = Trial::succeeded(
        6,
        params([("x", ParamValue::Float(0.6)), ("c", ParamValue::from("a"))]),
        0.6,
    )
    .unwrap();

    let s = sampler(HistoryPolicy::Lenient);
    let with_stale = with_extra(clean_history(), stale);
    let with_plain = with_extra(clean_history(), plain);
    for i in 10..20 {
        assert_eq!(
            s.next(&with_stale, i).unwrap().0,
            s.next(&with_plain, i).unwrap().0
        );
    }
}

#[test]
fn test_lenient_skips_mismatched_values() {
    let bad = Trial::succeeded(
        6,
        params([("x", ParamValue::Float(7.5)), ("c", ParamValue::from("z"))]),
        -1.0,
    )
    .unwrap();
    let history = with_extra(clean_history(), bad);

    let s = sampler(HistoryPolicy::Lenient);
    for i in 10..30 {
        let (p, _) = s.next(&history, i).unwrap();
        let x = p["x"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&x));
        assert!(p["c"] == ParamValue::from("a") || p["c"] == ParamValue::from("b"));
    }
}

#[test]
fn test_strict_rejects_unknown_parameter() {
    let stale = Trial::succeeded(
        6,
        params([("x", ParamValue::Float(0.6)), ("removed", ParamValue::Int(3))]),
        0.6,
    )
    .unwrap();
    let history = with_extra(clean_history(), stale);

    match sampler(HistoryPolicy::Strict).next(&history, 10) {
        Err(Error::InconsistentHistory {
            trial_id,
            name,
            issue,
        }) => {
            assert_eq!(trial_id, 6);
            assert_eq!(name, "removed");
            assert_eq!(issue, HistoryIssue::UnknownParameter);
        }
        other => panic!("expected InconsistentHistory, got {other:?}"),
    }
}

#[test]
fn test_strict_rejects_mismatched_value() {
    let bad = Trial::succeeded(6, params([("x", ParamValue::Int(1))]), 0.1).unwrap();
    let history = with_extra(clean_history(), bad);

    assert!(matches!(
        sampler(HistoryPolicy::Strict).next(&history, 10),
        Err(Error::InconsistentHistory {
            trial_id: 6,
            issue: HistoryIssue::ValueMismatch,
            ..
        })
    ));
}

#[test]
fn test_strict_checks_only_succeeded_trials() {
    let failed = Trial::failed(6, params([("removed", ParamValue::Null)]));
    let history = with_extra(clean_history(), failed);
    assert!(sampler(HistoryPolicy::Strict).next(&history, 10).is_ok());
}

#[test]
fn test_strict_accepts_consistent_history() {
    let s = sampler(HistoryPolicy::Strict);
    let (p, next) = s.next(&clean_history(), 10).unwrap();
    assert_eq!(p.len(), 2);
    assert_eq!(next.proposals(), 1);
}
