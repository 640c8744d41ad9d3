//! Integration tests for the normalizer (fit / apply).

use approx::assert_abs_diff_eq;
use dslr_classifiers::math::Array2;
use dslr_classifiers::preprocessing::{apply, apply_row, fit, fit_transform, NormalizationParams};
use dslr_classifiers::ModelError;

fn column(values: &[f64]) -> Array2<f64> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// fit
// ---------------------------------------------------------------------------

#[test]
fn fit_uses_population_std() {
    let params = fit(&column(&[1.0, 2.0, 3.0, 4.0, 5.0]));
    assert_abs_diff_eq!(params.mean()[0], 3.0);
    assert_abs_diff_eq!(params.std()[0], 1.4142, epsilon = 1e-4);
}

#[test]
fn fit_keeps_column_order() {
    let x = Array2::from_shape_vec(
        (3, 3),
        vec![
            1.0, 100.0, -5.0,
            2.0, 200.0, -5.0,
            3.0, 300.0, -5.0,
        ],
    )
    .unwrap();
    let params = fit(&x);
    assert_eq!(params.len(), 3);
    assert_abs_diff_eq!(params.mean()[0], 2.0);
    assert_abs_diff_eq!(params.mean()[1], 200.0);
    assert_abs_diff_eq!(params.mean()[2], -5.0);
    assert_eq!(params.std()[2], 0.0);
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

#[test]
fn standardizes_one_to_five() {
    let (_, t) = fit_transform(&column(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
    let expected = [-1.414, -0.707, 0.0, 0.707, 1.414];
    for (r, e) in expected.iter().enumerate() {
        assert_abs_diff_eq!(t[(r, 0)], *e, epsilon = 1e-3);
    }
}

#[test]
fn constant_column_normalizes_to_zeros() {
    let x = Array2::from_shape_vec(
        (4, 2),
        vec![
            0.3, 1.0,
            0.3, 2.0,
            0.3, 3.0,
            0.3, 4.0,
        ],
    )
    .unwrap();
    let (params, t) = fit_transform(&x).unwrap();
    assert_eq!(params.std()[0], 0.0);
    for r in 0..4 {
        assert_eq!(t[(r, 0)], 0.0);
    }
}

#[test]
fn renormalizing_keeps_zero_mean_unit_variance() {
    let x = column(&[3.0, -1.0, 7.5, 2.25, 0.0, 11.0, -4.0]);
    let (_, once) = fit_transform(&x).unwrap();
    let (params, twice) = fit_transform(&once).unwrap();

    assert_abs_diff_eq!(params.mean()[0], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(params.std()[0], 1.0, epsilon = 1e-12);
    for r in 0..x.nrows() {
        assert_abs_diff_eq!(twice[(r, 0)], once[(r, 0)], epsilon = 1e-12);
    }
}

#[test]
fn training_parameters_apply_to_new_data() {
    let params = fit(&column(&[1.0, 2.0, 3.0, 4.0, 5.0]));
    let t = apply(&column(&[3.0, 6.0]), &params).unwrap();
    assert_abs_diff_eq!(t[(0, 0)], 0.0);
    assert_abs_diff_eq!(t[(1, 0)], 3.0 / 2.0f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn column_count_mismatch_fails_fast() {
    let params = fit(&column(&[1.0, 2.0]));
    let x = Array2::from_shape_vec((1, 2), vec![1.0, 2.0]).unwrap();
    let err = apply(&x, &params).unwrap_err();
    assert!(matches!(
        err,
        ModelError::ShapeMismatch {
            expected: 1,
            found: 2,
            ..
        }
    ));
    assert!(apply_row(&[1.0, 2.0, 3.0], &params).is_err());
}

#[test]
fn parameters_are_only_built_with_matching_lengths() {
    let err = NormalizationParams::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
    assert!(matches!(
        err,
        ModelError::ShapeMismatch {
            expected: 2,
            found: 1,
            ..
        }
    ));

    let params = NormalizationParams::new(vec![1.0, 2.0], vec![0.5, 0.0]).unwrap();
    assert_eq!(params.mean(), &[1.0, 2.0]);
    assert_eq!(params.std(), &[0.5, 0.0]);
    assert_eq!(apply_row(&[2.0, 7.0], &params).unwrap(), vec![2.0, 0.0]);
}
