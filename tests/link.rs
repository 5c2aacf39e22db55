use psychometric::fit::Params;
use psychometric::link::{
    clamp_probability, inverse_logistic, logistic, logit, PROB_EPSILON,
};

#[test]
fn test_logistic() {
    assert_eq!(logistic(0.0), 0.5);
    assert!((logistic(1.0) - 0.7310585786300049).abs() < 1e-15);
    assert!((logistic(-1.0) + logistic(1.0) - 1.0).abs() < 1e-15);

    // The transform is total, even far away from zero.
    for y in [-1e6, -745.0, -40.0, 40.0, 745.0, 1e6] {
        let p = logistic(y);
        assert!(p.is_finite());
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn test_clamp_probability() {
    assert_eq!(clamp_probability(0.25), 0.25);
    assert_eq!(clamp_probability(0.0), PROB_EPSILON);
    assert_eq!(clamp_probability(1.0), 1.0 - PROB_EPSILON);

    let mut y = -1e4;
    while y < 1e4 {
        let p = clamp_probability(logistic(y));
        assert!(p >= 1e-10 && p <= 1.0 - 1e-10, "y = {}", y);
        assert!(p.ln().is_finite());
        assert!((1.0 - p).ln().is_finite());
        y += 7.3;
    }
}

#[test]
fn test_logit() {
    assert_eq!(logit(0.5).unwrap(), 0.0);
    assert!((logit(0.75).unwrap() - 3f64.ln()).abs() < 1e-15);
    assert!(logit(0.0).is_err());
    assert!(logit(1.0).is_err());
    assert!(logit(-0.1).is_err());
    assert!(logit(f64::NAN).is_err());
}

#[test]
fn test_inverse_round_trip() {
    let curves = [
        Params::new(0.0, 1.0),
        Params::new(0.3, 1.7),
        Params::new(-2.0, 0.25),
        Params::new(1.5, -3.0),
        Params::new(10.0, 40.0),
    ];
    let probs = [0.01, 0.1, 0.25, 0.5, 0.75, 0.9, 0.99];

    for b in &curves {
        for &p in &probs {
            let x = inverse_logistic(p, b).unwrap();
            let back = logistic(b.b0 + b.b1 * x);
            assert!((back - p).abs() < 1e-12, "{:?} p = {}", b, p);
        }
    }
}

#[test]
fn test_inverse_domain_errors() {
    let b = Params::new(0.2, 1.0);
    for p in [0.0, 1.0, -0.5, 1.5] {
        let err = inverse_logistic(p, &b).unwrap_err();
        assert_eq!(err.probability, p);
        assert_eq!(err.slope, 1.0);
    }

    // A flat curve never crosses any probability.
    let flat = Params::new(0.2, 0.0);
    assert!(inverse_logistic(0.5, &flat).is_err());
}

#[test]
fn test_inverse_at_half_is_bias() {
    let b = Params::new(-0.8, 2.0);
    let x50 = inverse_logistic(0.5, &b).unwrap();
    assert_eq!(x50, 0.4);
}
