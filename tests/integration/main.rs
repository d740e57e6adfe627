// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod arg_files;
mod pipeline;

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::prelude::*;

use wideband_pbcor::{normalised_offsets, TaylorMaps};

fn make_file_in_dir<T: AsRef<Path>, U: AsRef<Path>>(filename: T, dir: U) -> (PathBuf, File) {
    let path = dir.as_ref().join(filename);
    let f = File::create(&path).expect("couldn't make file");
    (path, f)
}

/// Beam plane frequencies \[Hz\].
const BEAM_FREQS_HZ: [f64; 7] = [1.2e9, 1.3e9, 1.4e9, 1.5e9, 1.6e9, 1.7e9, 1.8e9];

/// Per-pixel beam coefficients (term 0 first).
const BEAM_COEFFS: [f64; 3] = [0.9, -0.2, 0.1];

/// Per-pixel intrinsic sky coefficients (term 0 first).
const SKY_COEFFS: [f64; 3] = [1.5, -1.2, 0.45];

/// Sample a quadratic beam at every beam frequency. The last column of pixels
/// is outside the beam.
fn beam_cube(ref_freq_ghz: f64, num_x: usize, num_y: usize) -> Array3<f64> {
    let freqs_ghz: Vec<f64> = BEAM_FREQS_HZ.iter().map(|f| f / 1e9).collect();
    let offsets = normalised_offsets(&freqs_ghz, ref_freq_ghz);
    Array3::from_shape_fn((num_x, num_y, offsets.len()), |(_, y, n)| {
        if y + 1 == num_y {
            0.0
        } else {
            let x = offsets[n];
            BEAM_COEFFS[0] + BEAM_COEFFS[1] * x + BEAM_COEFFS[2] * x * x
        }
    })
}

/// The sky seen through the beam: the product of the beam and sky series,
/// truncated to 3 terms.
fn apparent_sky(num_x: usize, num_y: usize) -> TaylorMaps {
    let terms = (0..3)
        .map(|k| {
            let coeff: f64 = (0..=k).map(|j| BEAM_COEFFS[j] * SKY_COEFFS[k - j]).sum();
            Array2::from_elem((num_x, num_y), coeff)
        })
        .collect();
    TaylorMaps::try_from_vec(terms).unwrap()
}
