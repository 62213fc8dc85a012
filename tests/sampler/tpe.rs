use parzen::sampler::{TpeConfig, TpeSampler};
use parzen::{Direction, Distribution, Error, ParamValue, SearchSpace, SpaceDefect, Trial};

use super::{best_min, params, run, seeded};

#[test]
fn test_tpe_optimizes_quadratic_function() {
    // Minimize f(x) = (x - 3)^2 where x in [-10, 10]
    let space = SearchSpace::new().uniform("x", -10.0, 10.0);
    let history = run(seeded(space, 42, 10), 100, |p| {
        (p["x"].as_f64().unwrap() - 3.0).powi(2)
    });

    let best = best_min(&history);
    assert!(best < 5.0, "best value {best} should be < 5.0");
}

#[test]
fn test_tpe_optimizes_multivariate_function() {
    let space = SearchSpace::new()
        .uniform("x", -5.0, 5.0)
        .uniform("y", -5.0, 5.0);
    let history = run(seeded(space, 123, 10), 100, |p| {
        let x = p["x"].as_f64().unwrap();
        let y = p["y"].as_f64().unwrap();
        x * x + y * y
    });

    let best = best_min(&history);
    assert!(best < 5.0, "best value {best} should be < 5.0");
}

#[test]
fn test_tpe_maximization() {
    // Maximize f(x) = -(x - 2)^2 + 10 where x in [-10, 10]
    let config = TpeConfig::builder()
        .maximize()
        .seed(456)
        .min_obs(5)
        .build()
        .unwrap();
    let sampler = TpeSampler::new(config, SearchSpace::new().uniform("x", -10.0, 10.0)).unwrap();
    let history = run(sampler, 60, |p| -(p["x"].as_f64().unwrap() - 2.0).powi(2) + 10.0);

    let best = history
        .iter()
        .filter_map(Trial::score)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(best > 5.0, "best value {best} should be > 5.0");
}

#[test]
fn test_outputs_respect_bounds_and_membership() {
    let space = SearchSpace::new()
        .uniform("u", -1.0, 1.0)
        .log_uniform("lr", 1e-5, 1e-1)
        .int("depth", 3, 20)
        .choice("max_features", [Some("sqrt"), Some("log2"), None])
        .choice("bootstrap", [true, false]);
    let check = space.clone();

    let history = run(seeded(space, 7, 5), 120, |p| {
        p["u"].as_f64().unwrap().abs() + p["lr"].as_f64().unwrap()
    });

    for trial in &history {
        for (name, dist) in check.iter() {
            let value = trial.param(name).unwrap();
            assert!(dist.contains(value), "{name} = {value} outside {dist:?}");
        }
        assert!(trial.param("lr").unwrap().as_f64().unwrap() > 0.0);
        assert!(trial.param("depth").unwrap().as_i64().is_some());
    }
}

#[test]
fn test_modeling_favors_dominating_region() {
    // 50 evenly spaced observations; lower x is better, so the good
    // partition covers roughly [0, 0.25].
    let history: Vec<Trial> = (0..50u64)
        .map(|i| {
            let x = (i as f64 + 0.5) / 50.0;
            Trial::succeeded(i, params([("x", ParamValue::Float(x))]), x).unwrap()
        })
        .collect();
    let sampler = seeded(SearchSpace::new().uniform("x", 0.0, 1.0), 2024, 10);

    let n = 1000;
    let hits = (1000..1000 + n)
        .filter(|&i| {
            let (p, _) = sampler.next(&history, i).unwrap();
            p["x"].as_f64().unwrap() < 0.25
        })
        .count();

    // A uniform baseline would land in [0, 0.25) about a quarter of the time.
    assert!(
        hits as f64 / n as f64 > 0.5,
        "only {hits} / {n} draws in the dominating region"
    );
}

#[test]
fn test_int_outputs_are_integers_in_bounds() {
    let space = SearchSpace::new().int("n", -3, 4);
    let history = run(seeded(space, 5, 5), 80, |p| {
        (p["n"].as_i64().unwrap() as f64 - 1.0).abs()
    });

    for trial in &history {
        let n = trial.param("n").unwrap().as_i64().unwrap();
        assert!((-3..=4).contains(&n));
    }
}

#[test]
fn test_degenerate_int_range_always_returns_single_value() {
    let space = SearchSpace::new().int("k", 5, 5).uniform("x", 0.0, 1.0);
    let history = run(seeded(space, 9, 3), 30, |p| p["x"].as_f64().unwrap());

    for trial in &history {
        assert_eq!(trial.param("k"), Some(&ParamValue::Int(5)));
    }
}

#[test]
fn test_same_seed_same_proposals() {
    let space = SearchSpace::new()
        .uniform("x", 0.0, 1.0)
        .choice("c", ["a", "b"]);
    let history = run(seeded(space.clone(), 99, 5), 20, |p| p["x"].as_f64().unwrap());

    let a = seeded(space.clone(), 99, 5);
    let b = seeded(space, 99, 5);
    for i in 20..40 {
        assert_eq!(a.next(&history, i).unwrap().0, b.next(&history, i).unwrap().0);
    }
}

#[test]
fn test_different_seeds_differ() {
    let space = SearchSpace::new().uniform("x", 0.0, 1.0);
    let (a, _) = seeded(space.clone(), 1, 5).next(&[], 0).unwrap();
    let (b, _) = seeded(space, 2, 5).next(&[], 0).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_empty_choice_fails_on_first_next() {
    let space = SearchSpace::new()
        .uniform("x", 0.0, 1.0)
        .with("kind", Distribution::Choice(vec![]));
    let sampler = seeded(space, 0, 5);

    match sampler.next(&[], 0) {
        Err(Error::InvalidSpace { name, defect }) => {
            assert_eq!(name, "kind");
            assert_eq!(defect, SpaceDefect::EmptyChoices);
        }
        other => panic!("expected InvalidSpace, got {other:?}"),
    }
}

#[test]
fn test_inverted_bounds_fail_on_first_next() {
    let sampler = seeded(SearchSpace::new().uniform("x", 1.0, 0.0), 0, 5);
    assert!(matches!(
        sampler.next(&[], 0),
        Err(Error::InvalidSpace {
            defect: SpaceDefect::InvertedBounds { .. },
            ..
        })
    ));
}

#[test]
fn test_overflowing_width_fails_on_first_next() {
    let sampler = seeded(SearchSpace::new().uniform("x", -1e308, 1e308), 1, 5);
    match sampler.next(&[], 0) {
        Err(Error::InvalidSpace { name, defect }) => {
            assert_eq!(name, "x");
            assert_eq!(
                defect,
                SpaceDefect::NonFiniteRange {
                    low: -1e308,
                    high: 1e308
                }
            );
        }
        other => panic!("expected InvalidSpace, got {other:?}"),
    }
}

#[test]
fn test_wide_finite_width_still_samples_both_signs() {
    let space = SearchSpace::new().uniform("x", -8e307, 8e307);
    let history = run(seeded(space, 1, 1000), 200, |p| p["x"].as_f64().unwrap());

    let values: Vec<f64> = history
        .iter()
        .map(|t| t.param("x").unwrap().as_f64().unwrap())
        .collect();
    assert!(values.iter().all(|v| v.is_finite()));
    assert!(values.iter().any(|&v| v < 0.0));
    assert!(values.iter().any(|&v| v > 0.0));
}

#[test]
fn test_space_can_depend_on_trial_index() {
    let space = |index: u64| {
        if index < 10 {
            SearchSpace::new().uniform("x", 0.0, 1.0)
        } else {
            SearchSpace::new()
                .uniform("x", 0.0, 1.0)
                .int("extra", 1, 3)
        }
    };
    let history = run(seeded(space, 3, 5), 20, |p| p["x"].as_f64().unwrap());

    assert!(history[..10].iter().all(|t| t.param("extra").is_none()));
    assert!(history[10..].iter().all(|t| t.param("extra").is_some()));
}

#[test]
fn test_space_turning_invalid_fails_at_that_index() {
    let space = |index: u64| {
        let high = if index < 5 { 1.0 } else { -1.0 };
        SearchSpace::new().uniform("x", 0.0, high)
    };
    let sampler = seeded(space, 3, 5);
    assert!(sampler.next(&[], 4).is_ok());
    assert!(matches!(
        sampler.next(&[], 5),
        Err(Error::InvalidSpace { .. })
    ));
}

#[test]
fn test_non_succeeded_trials_do_not_inform_model() {
    let space = SearchSpace::new().uniform("x", 0.0, 1.0);
    let sampler = seeded(space, 17, 3);

    let succeeded: Vec<Trial> = (0..6u64)
        .map(|i| {
            let x = i as f64 / 6.0;
            Trial::succeeded(i, params([("x", ParamValue::Float(x))]), x).unwrap()
        })
        .collect();
    let mut mixed = succeeded.clone();
    mixed.push(Trial::failed(6, params([("x", ParamValue::Float(0.9))])));
    mixed.push(Trial::pruned(7, params([("x", ParamValue::Float(0.95))]), Some(0.1)));
    mixed.push(Trial::running(8, params([("x", ParamValue::Float(0.99))])));

    for i in 10..30 {
        assert_eq!(
            sampler.next(&succeeded, i).unwrap().0,
            sampler.next(&mixed, i).unwrap().0
        );
    }
}

#[test]
fn test_config_direction_is_used() {
    let config = TpeConfig::builder()
        .direction(Direction::Maximize)
        .build()
        .unwrap();
    let sampler = TpeSampler::new(config, SearchSpace::new()).unwrap();
    assert_eq!(sampler.config().direction, Direction::Maximize);
    let (p, _) = sampler.next(&[], 0).unwrap();
    assert!(p.is_empty());
}
