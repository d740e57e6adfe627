// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;
use wideband_pbcor::{FrequencyAxis, PbCorrector, PbcorArgs, PbcorInputs};

#[test]
fn three_term_pbcor_recovers_alpha_and_beta() {
    let (num_x, num_y) = (3, 4);
    let params = PbcorArgs {
        nterms: Some(3),
        threshold: Some("10mJy".to_string()),
        reffreq: Some("1.5GHz".to_string()),
        pbmin: Some(0.05),
        weights: Some(vec![1.0; BEAM_FREQS_HZ.len()]),
        ..Default::default()
    }
    .parse(None)
    .unwrap();

    let cube = beam_cube(params.ref_freq_ghz, num_x, num_y);
    let freqs = FrequencyAxis::Tabular(BEAM_FREQS_HZ.to_vec());
    let taylor = apparent_sky(num_x, num_y);
    let residuals = TaylorMaps::try_from_vec(vec![Array2::from_elem((num_x, num_y), 0.015); 3])
        .unwrap();

    let products = PbCorrector::new(params)
        .run(PbcorInputs {
            beam_cube: Some(cube.view()),
            beam_freqs: Some(&freqs),
            taylor: &taylor,
            residuals: Some(&residuals),
        })
        .unwrap();

    let beam = products.beam.unwrap();
    for (t, &expected) in BEAM_COEFFS.iter().enumerate() {
        assert_abs_diff_eq!(beam.term(t)[(1, 1)], expected, epsilon = 1e-9);
        assert_abs_diff_eq!(beam.term(t)[(1, num_y - 1)], 0.0);
    }

    let corrected = products.corrected.unwrap();
    for (map, &expected) in corrected.iter().zip(SKY_COEFFS.iter()) {
        assert_abs_diff_eq!(map.values[(2, 0)], expected, epsilon = 1e-9);
        assert!(map.valid[(2, 0)]);
        assert!(!map.valid[(2, num_y - 1)]);
    }

    let si = products.spectral_index.unwrap();
    let alpha = SKY_COEFFS[1] / SKY_COEFFS[0];
    let beta = SKY_COEFFS[2] / SKY_COEFFS[0] - 0.5 * alpha * (alpha - 1.0);
    assert_abs_diff_eq!(si.alpha.values[(0, 0)], alpha, epsilon = 1e-9);
    assert_abs_diff_eq!(si.beta.unwrap().values[(0, 0)], beta, epsilon = 1e-9);

    let error = si.alpha_error.unwrap();
    let expected_error = alpha.abs()
        * ((0.015 / SKY_COEFFS[0]).powi(2) + (0.015 / SKY_COEFFS[1]).powi(2)).sqrt();
    assert_abs_diff_eq!(error.values[(0, 0)], expected_error, epsilon = 1e-9);
    assert_eq!(error.num_valid(), num_x * (num_y - 1));

    let pb_alpha = products.pb_alpha.unwrap();
    assert_abs_diff_eq!(
        pb_alpha.values[(0, 0)],
        BEAM_COEFFS[1] / BEAM_COEFFS[0],
        epsilon = 1e-9
    );
    assert_eq!(pb_alpha.num_valid(), num_x * (num_y - 1));
}

#[test]
fn nan_masked_products() {
    let (num_x, num_y) = (2, 3);
    let params = PbcorArgs {
        nterms: Some(2),
        ..Default::default()
    }
    .parse(Some(1.5))
    .unwrap();
    let cube = beam_cube(params.ref_freq_ghz, num_x, num_y);
    let freqs = FrequencyAxis::Linear {
        reference_hz: 1.2e9,
        increment_hz: 0.1e9,
        count: BEAM_FREQS_HZ.len(),
    };
    let taylor = TaylorMaps::try_from_vec(apparent_sky(num_x, num_y).into_vec()[..2].to_vec())
        .unwrap();

    let products = PbCorrector::new(params)
        .run(PbcorInputs {
            beam_cube: Some(cube.view()),
            beam_freqs: Some(&freqs),
            taylor: &taylor,
            residuals: None,
        })
        .unwrap();

    let alpha = products.spectral_index.unwrap().alpha.to_nan_masked();
    for ((_, y), &value) in alpha.indexed_iter() {
        if y + 1 == num_y {
            assert!(value.is_nan());
        } else {
            assert!(value.is_finite());
        }
    }
}
