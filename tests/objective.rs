use psychometric::data::{Dataset, Observation};
use psychometric::link::logistic;
use psychometric::objective::NegativeLogLikelihood;
use psychometric::utils::linspace;
use psychometric::Objective;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Simulate 'n' trials from the curve (b0, b1) over [-3, 3].
fn simulate(b0: f64, b1: f64, n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    linspace(-3.0, 3.0, n)
        .into_iter()
        .map(|x| {
            let p = logistic(b0 + b1 * x);
            Observation::new(x, rng.gen::<f64>() <= p)
        })
        .collect()
}

#[test]
fn test_known_values() {
    let positions = [-1.0, 0.0, 2.0];
    let responses = [false, true, true];
    let nll = NegativeLogLikelihood::new(&positions, &responses);
    assert_eq!(nll.len(), 3);

    // At (0, 0) every trial has p = 0.5.
    let expected = 3.0 * 2f64.ln();
    assert!((nll.evaluate(0.0, 0.0) - expected).abs() < 1e-12);

    let (b0, b1) = (0.5, 1.5);
    let mut expected = 0.0;
    expected -= (1.0 - logistic(b0 - b1)).ln();
    expected -= logistic(b0).ln();
    expected -= logistic(b0 + 2.0 * b1).ln();
    assert!((nll.evaluate(b0, b1) - expected).abs() < 1e-12);
    assert_eq!(nll.value(&[b0, b1]), nll.evaluate(b0, b1));
}

#[test]
fn test_empty_objective() {
    let nll = NegativeLogLikelihood::new(&[], &[]);
    assert!(nll.is_empty());
    assert_eq!(nll.evaluate(1.0, 2.0), 0.0);
}

#[test]
fn test_extreme_parameters_stay_finite() {
    let data = simulate(0.0, 1.0, 50, 1);
    let nll = data.objective();

    for (b0, b1) in [
        (1e6, 1e6),
        (-1e6, 1e6),
        (0.0, -1e8),
        (1e300, 0.0),
        (-1e300, 0.0),
    ] {
        let value = nll.evaluate(b0, b1);
        assert!(value.is_finite(), "({}, {}) gave {}", b0, b1, value);
        assert!(value >= 0.0);
        // Each trial contributes at most -ln(1e-10).
        assert!(value <= 50.0 * -(1e-10f64).ln() + 1e-9);
    }
}

#[test]
fn test_true_parameters_beat_wrong_ones() {
    let (b0, b1) = (0.5, 2.0);
    let data = simulate(b0, b1, 2000, 7);
    let nll = data.objective();

    let at_truth = nll.evaluate(b0, b1);
    assert!(at_truth < nll.evaluate(0.0, 0.0));
    assert!(at_truth < nll.evaluate(b0, -b1));
    assert!(at_truth < nll.evaluate(-3.0, 0.1));
}

#[test]
fn test_order_does_not_matter() {
    let data = simulate(-0.2, 1.3, 101, 3);
    let reversed: Dataset = data
        .iter()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let a = data.objective().evaluate(0.1, 0.9);
    let b = reversed.objective().evaluate(0.1, 0.9);
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_closures_are_objectives() {
    fn eval<O: Objective + ?Sized>(obj: &O, x: &[f64]) -> f64 {
        obj.value(x)
    }

    let quadratic = |x: &[f64]| x[0] * x[0] + x[1] * x[1];
    assert_eq!(eval(&quadratic, &[3.0, 4.0]), 25.0);
}

#[test]
#[should_panic]
fn test_mismatched_columns() {
    let _ = NegativeLogLikelihood::new(&[1.0, 2.0], &[true]);
}

#[test]
#[should_panic]
fn test_short_parameter_vector() {
    let nll = NegativeLogLikelihood::new(&[1.0], &[true]);
    let _ = nll.value(&[0.5]);
}
