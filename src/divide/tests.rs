// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use vec1::vec1;

use super::*;

fn maps_from_pixels(pixels: &[&[f64]]) -> TaylorMaps {
    // One row of pixels; each pixel lists its terms.
    let nterms = pixels[0].len();
    let terms = (0..nterms)
        .map(|t| Array2::from_shape_fn((1, pixels.len()), |(_, p)| pixels[p][t]))
        .collect();
    TaylorMaps::try_from_vec(terms).unwrap()
}

/// The product of two series, truncated to the length of `a`.
fn truncated_product(a: &[f64], b: &[f64]) -> Vec<f64> {
    (0..a.len())
        .map(|k| (0..=k).map(|j| a[j] * b[k - j]).sum())
        .collect()
}

#[test]
fn division_inverts_multiplication() {
    let denominators: [&[f64]; 4] = [
        &[0.93, -0.41, 0.27],
        &[0.12, 0.05, -0.33],
        &[-1.7, 2.2, 0.9],
        &[0.5, 0.0, 0.0],
    ];
    let quotients: [&[f64]; 4] = [
        &[1.3, -0.7, 0.2],
        &[0.02, 3.1, -1.4],
        &[-4.0, 0.25, 0.75],
        &[2.0, 1.0, -1.0],
    ];

    for nterms in 1..=MAX_DIVIDE_TERMS {
        let d: Vec<&[f64]> = denominators.iter().map(|d| &d[..nterms]).collect();
        let q: Vec<&[f64]> = quotients.iter().map(|q| &q[..nterms]).collect();
        let n: Vec<Vec<f64>> = d
            .iter()
            .zip(q.iter())
            .map(|(d, q)| truncated_product(d, q))
            .collect();
        let n: Vec<&[f64]> = n.iter().map(|n| n.as_slice()).collect();

        let result = divide_taylor(&maps_from_pixels(&n), &maps_from_pixels(&d)).unwrap();
        let expected = maps_from_pixels(&q);
        for t in 0..nterms {
            assert_abs_diff_eq!(result.term(t), expected.term(t), epsilon = 1e-12);
        }
    }
}

#[test]
fn closed_form_three_terms() {
    let (n0, n1, n2) = (0.8, -0.2, 0.05);
    let (d0, d1, d2) = (0.9, -0.3, 0.1);
    let result = divide_taylor(
        &maps_from_pixels(&[&[n0, n1, n2]]),
        &maps_from_pixels(&[&[d0, d1, d2]]),
    )
    .unwrap();

    let det = d0 * d0 * d0;
    assert_abs_diff_eq!(result.term(0)[(0, 0)], d0 * d0 * n0 / det, epsilon = 1e-14);
    assert_abs_diff_eq!(
        result.term(1)[(0, 0)],
        (-d0 * d1 * n0 + d0 * d0 * n1) / det,
        epsilon = 1e-14
    );
    assert_abs_diff_eq!(
        result.term(2)[(0, 0)],
        ((d1 * d1 - d0 * d2) * n0 - d0 * d1 * n1 + d0 * d0 * n2) / det,
        epsilon = 1e-14
    );
}

#[test]
fn zero_beam_pixels_use_unit_det() {
    // d0 = 0 means det is replaced by 1.
    let result = divide_taylor(&maps_from_pixels(&[&[2.0]]), &maps_from_pixels(&[&[0.0]])).unwrap();
    assert_abs_diff_eq!(result.term(0)[(0, 0)], 2.0);

    let result = divide_taylor(
        &maps_from_pixels(&[&[2.0, 3.0]]),
        &maps_from_pixels(&[&[0.0, 0.5]]),
    )
    .unwrap();
    assert_abs_diff_eq!(result.term(0)[(0, 0)], 0.0);
    assert_abs_diff_eq!(result.term(1)[(0, 0)], -1.0);

    let result = divide_taylor(
        &maps_from_pixels(&[&[2.0, 3.0, 4.0]]),
        &maps_from_pixels(&[&[0.0, 0.5, 0.25]]),
    )
    .unwrap();
    assert_abs_diff_eq!(result.term(0)[(0, 0)], 0.0);
    assert_abs_diff_eq!(result.term(1)[(0, 0)], 0.0);
    // (d1^2 - 0) n0
    assert_abs_diff_eq!(result.term(2)[(0, 0)], 0.5);
    assert!(result.iter().all(|m| m.iter().all(|v| v.is_finite())));
}

#[test]
fn masked_division() {
    let sky = maps_from_pixels(&[&[1.0, 0.1], &[1.0, 0.1], &[1.0, 0.1]]);
    let beam = maps_from_pixels(&[&[0.5, -0.1], &[0.001, 0.0], &[0.0005, 0.0]]);
    let corrected = divide_taylor_masked(&sky, &beam, 0.001).unwrap();
    assert_eq!(corrected.len(), 2);
    for term in corrected.iter() {
        assert_eq!(term.valid, array![[true, false, false]]);
    }
    assert_abs_diff_eq!(corrected[0].values[(0, 0)], 2.0, epsilon = 1e-14);
    // (-d1 n0 + d0 n1) / d0^2 = (0.1 + 0.05) / 0.25
    assert_abs_diff_eq!(corrected[1].values[(0, 0)], 0.6, epsilon = 1e-14);
}

#[test]
fn term_count_mismatch() {
    let sky = maps_from_pixels(&[&[1.0, 0.1]]);
    let beam = maps_from_pixels(&[&[1.0, 0.1, 0.0]]);
    assert_eq!(
        divide_taylor(&sky, &beam).unwrap_err(),
        DivideError::TermCountMismatch {
            numerator: 2,
            denominator: 3
        }
    );
}

#[test]
fn map_shape_mismatch() {
    let sky = TaylorMaps::new(vec1![Array2::ones((2, 2))]).unwrap();
    let beam = TaylorMaps::new(vec1![Array2::ones((2, 3))]).unwrap();
    assert_eq!(
        divide_taylor(&sky, &beam).unwrap_err(),
        DivideError::MapShapeMismatch {
            numerator: (2, 2),
            denominator: (2, 3)
        }
    );
}

#[test]
fn four_terms_are_unsupported() {
    let maps = maps_from_pixels(&[&[1.0, 0.1, 0.0, 0.0]]);
    assert_eq!(
        divide_taylor(&maps, &maps).unwrap_err(),
        DivideError::UnsupportedOrder {
            nterms: 4,
            max: MAX_DIVIDE_TERMS
        }
    );
}
