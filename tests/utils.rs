use psychometric::utils::naming::{with_suffix, DIST_SUFFIX, PARAMS_SUFFIX};
use psychometric::utils::{linspace, min_max};
use std::path::{Path, PathBuf};

#[test]
fn test_min_max() {
    assert_eq!(min_max(&[]), None);
    assert_eq!(min_max(&[3.0]), Some((3.0, 3.0)));
    assert_eq!(min_max(&[0.5, -2.0, 7.25, 1.0]), Some((-2.0, 7.25)));
    assert_eq!(min_max(&[-1.0, -1.0]), Some((-1.0, -1.0)));
}

#[test]
fn test_linspace() {
    assert!(linspace(0.0, 1.0, 0).is_empty());
    assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    assert_eq!(linspace(-1.0, 1.0, 5), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

    let points = linspace(-3.0, 4.0, 50);
    assert_eq!(points.len(), 50);
    assert_eq!(points[0], -3.0);
    assert!((points[49] - 4.0).abs() < 1e-12);

    // A zero-width range repeats the single value.
    assert!(linspace(0.7, 0.7, 4).iter().all(|x| *x == 0.7));
}

#[test]
fn test_with_suffix() {
    assert_eq!(
        with_suffix(Path::new("run.txt"), PARAMS_SUFFIX),
        PathBuf::from("run.txt_params")
    );
    assert_eq!(
        with_suffix(Path::new("/tmp/a/subject 1"), DIST_SUFFIX),
        PathBuf::from("/tmp/a/subject 1_dist")
    );
}
