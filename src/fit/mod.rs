// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Weighted least-squares fits of Taylor polynomials to per-pixel frequency
//! samples.
//!
//! Every pixel shares the same frequency sampling and weights, so the normal
//! equations have the same "Hessian" everywhere. It is built and inverted once
//! ([`Hessian`]); each pixel then only needs a small matrix-vector product.

mod error;

pub use error::FitError;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, trace};
use nalgebra::DMatrix;
use ndarray::prelude::*;
use rayon::prelude::*;

use crate::{
    constants::{MAX_FIT_TERMS, SINGULAR_VALUE_RATIO_LIMIT},
    taylor::TaylorMaps,
    PROGRESS_BARS,
};

/// The pixel-independent normal-equations matrix of a weighted polynomial fit,
/// with its inverse folded into a projection from samples to coefficients.
#[derive(Debug, Clone)]
pub(crate) struct Hessian {
    /// `H[i, j] = mean_n(x_n^(i+j) w_n) / H[0, 0]`
    pub(crate) matrix: Array2<f64>,

    pub(crate) inverse: Array2<f64>,

    /// `inverse · basis`, where `basis[i, n] = x_n^i w_n / (N H[0, 0])`. Applying
    /// this to a pixel's samples gives its coefficients directly.
    projection: Array2<f64>,
}

impl Hessian {
    pub(crate) fn new(offsets: &[f64], weights: &[f64], nterms: usize) -> Result<Hessian, FitError> {
        assert_eq!(offsets.len(), weights.len());
        let num_samples = offsets.len() as f64;

        let weighted_mean_power = |power: i32| {
            offsets
                .iter()
                .zip(weights)
                .map(|(x, w)| x.powi(power) * w)
                .sum::<f64>()
                / num_samples
        };
        let mut matrix = Array2::from_shape_fn((nterms, nterms), |(i, j)| {
            weighted_mean_power((i + j) as i32)
        });

        // Normalise for conditioning.
        let norm = matrix[(0, 0)];
        if norm == 0.0 || !norm.is_finite() {
            return Err(FitError::SingularSystem { nterms });
        }
        matrix /= norm;

        let inverse = invert(matrix.view()).ok_or(FitError::SingularSystem { nterms })?;

        let basis = Array2::from_shape_fn((nterms, offsets.len()), |(i, n)| {
            offsets[n].powi(i as i32) * weights[n] / (num_samples * norm)
        });
        let projection = inverse.dot(&basis);

        Ok(Hessian {
            matrix,
            inverse,
            projection,
        })
    }

    /// Get the Taylor coefficients for one pixel's samples.
    pub(crate) fn solve(&self, samples: ArrayView1<f64>) -> Array1<f64> {
        self.projection.dot(&samples)
    }
}

/// Invert a small square matrix, returning `None` if it is singular or so
/// poorly conditioned that the inverse is meaningless.
///
/// Moments of higher powers are tiny for narrow bands, so the matrix is
/// scaled by its diagonal (`D^-1/2 H D^-1/2`) before the rank test and the
/// scaled inverse is unscaled afterwards.
fn invert(matrix: ArrayView2<f64>) -> Option<Array2<f64>> {
    let n = matrix.nrows();
    let mut scales = Vec::with_capacity(n);
    for i in 0..n {
        let d = matrix[(i, i)];
        if d <= 0.0 || !d.is_finite() {
            return None;
        }
        scales.push(d.sqrt().recip());
    }
    let scaled = DMatrix::from_fn(n, n, |i, j| matrix[(i, j)] * scales[i] * scales[j]);

    let singular_values = scaled.clone().svd(false, false).singular_values;
    let max = singular_values.max();
    let min = singular_values.min();
    if !(max.is_finite() && min.is_finite()) || min <= max * SINGULAR_VALUE_RATIO_LIMIT {
        return None;
    }

    let inv = scaled.try_inverse()?;
    let inv = Array2::from_shape_fn((n, n), |(i, j)| inv[(i, j)] * scales[i] * scales[j]);
    if inv.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(inv)
}

/// Fit an `nterms`-term polynomial in normalised frequency offset to every
/// pixel of `cube`, which has shape (X, Y, N); the N sample planes correspond
/// to `offsets`. `weights` defaults to all ones.
///
/// Only pixels whose first sample plane is above `threshold` are fitted. All
/// terms are zero at other pixels, and at any pixel whose fitted term 0 ends up
/// below `threshold`.
pub fn fit_taylor_coeffs(
    offsets: &[f64],
    cube: ArrayView3<f64>,
    weights: Option<&[f64]>,
    threshold: f64,
    nterms: usize,
) -> Result<TaylorMaps, FitError> {
    if !(1..=MAX_FIT_TERMS).contains(&nterms) {
        return Err(FitError::UnsupportedOrder {
            nterms,
            max: MAX_FIT_TERMS,
        });
    }

    let (num_x, num_y, num_planes) = cube.dim();
    if offsets.len() != num_planes {
        return Err(FitError::FreqPlaneMismatch {
            num_freqs: offsets.len(),
            num_planes,
        });
    }
    let ones;
    let weights = match weights {
        Some(w) => {
            if w.len() != offsets.len() {
                return Err(FitError::FreqWeightMismatch {
                    num_freqs: offsets.len(),
                    num_weights: w.len(),
                });
            }
            w
        }
        None => {
            ones = vec![1.0; offsets.len()];
            ones.as_slice()
        }
    };

    let hessian = Hessian::new(offsets, weights, nterms)?;
    debug!("Hessian: {}", hessian.matrix);
    debug!("Inverse Hessian: {}", hessian.inverse);

    let progress = ProgressBar::with_draw_target(
        Some(num_x as _),
        if PROGRESS_BARS.load() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        },
    )
    .with_style(
        ProgressStyle::default_bar()
            .template("{msg:17}: [{wide_bar:.blue}] {pos:4}/{len:4} rows ({elapsed_precise}<{eta_precise})")
            .unwrap()
            .progress_chars("=> "),
    )
    .with_position(0)
    .with_message("Fitting PB terms");

    let mut coeffs = Array3::zeros((num_x, num_y, nterms));
    coeffs
        .outer_iter_mut()
        .into_par_iter()
        .zip(cube.outer_iter().into_par_iter())
        .for_each(|(mut coeffs_y, samples_y)| {
            coeffs_y
                .outer_iter_mut()
                .zip(samples_y.outer_iter())
                .for_each(|(mut pixel_coeffs, samples)| {
                    if samples[0] > threshold {
                        pixel_coeffs.assign(&hessian.solve(samples));
                        if pixel_coeffs[0] < threshold {
                            pixel_coeffs.fill(0.0);
                        }
                    }
                });
            progress.inc(1);
        });
    progress.finish();
    trace!("Finished fitting {num_x} rows of {num_y} pixels");

    Ok(TaylorMaps::from_coeff_cube(coeffs.view()))
}
