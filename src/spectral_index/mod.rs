// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spectral index, curvature and spectral-index error maps from Taylor
//! coefficients.
//!
//! With Taylor maps `t0`, `t1`, `t2` (and optionally residual maps `r0`, `r1`):
//!
//! ```text
//! alpha = t1 / t0
//! beta  = t2 / t0 - alpha (alpha - 1) / 2
//! error = |alpha| sqrt((r0 / t0)^2 + (r1 / t1)^2)
//! ```
//!
//! Before dividing, `t0` is set to 1 where it is below [`INTENSITY_FLOOR`] or
//! the threshold, and the higher terms are zeroed where `t0` is below the
//! threshold. All products are masked where `t0` is at or below the threshold.

mod error;

pub use error::SpectralIndexError;

use log::{debug, warn};
use ndarray::prelude::*;
use ndarray::Zip;

use crate::{
    constants::INTENSITY_FLOOR,
    taylor::{masked_divide, validity_mask, MaskedMap, TaylorMaps},
};

/// Spectral-index products.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralIndexMaps {
    /// Spectral index.
    pub alpha: MaskedMap,

    /// Spectral curvature; only available with more than 2 Taylor terms.
    pub beta: Option<MaskedMap>,

    /// Propagated error of the spectral index; only available if residual maps
    /// were supplied.
    pub alpha_error: Option<MaskedMap>,
}

/// Compute the spectral index (and curvature and error, where possible) from
/// `taylor`. Pixels with term 0 at or below `threshold` are masked.
///
/// With only one Taylor term there is no spectral information; a warning is
/// logged and `None` is returned.
pub fn calc_spectral_index(
    taylor: &TaylorMaps,
    residuals: Option<&TaylorMaps>,
    threshold: f64,
) -> Result<Option<SpectralIndexMaps>, SpectralIndexError> {
    let nterms = taylor.nterms();
    if let Some(residuals) = residuals {
        if residuals.nterms() != nterms {
            return Err(SpectralIndexError::TermCountMismatch {
                taylor: nterms,
                residuals: residuals.nterms(),
            });
        }
        if residuals.dim() != taylor.dim() {
            return Err(SpectralIndexError::MapShapeMismatch {
                taylor: taylor.dim(),
                residuals: residuals.dim(),
            });
        }
    }

    if nterms == 1 {
        warn!("Cannot compute spectral index with only one Taylor term");
        return Ok(None);
    }
    debug!("Computing spectral index with {nterms} Taylor terms and threshold {threshold}");

    let t0 = taylor.term(0);
    let valid = validity_mask(t0, threshold);
    let below = t0.mapv(|v| v < threshold);
    let t0_guarded = t0.mapv(|v| {
        if v < INTENSITY_FLOOR || v < threshold {
            1.0
        } else {
            v
        }
    });
    let zero_below = |term: ArrayView2<f64>| {
        Zip::from(term)
            .and(&below)
            .map_collect(|&v, &b| if b { 0.0 } else { v })
    };

    let t1 = zero_below(taylor.term(1));
    let alpha = masked_divide(t1.view(), t0_guarded.view(), valid.clone());

    let beta = if nterms > 2 {
        let t2 = zero_below(taylor.term(2));
        let mut beta = masked_divide(t2.view(), t0_guarded.view(), valid.clone());
        Zip::from(&mut beta.values)
            .and(&alpha.values)
            .for_each(|b, &a| *b -= 0.5 * a * (a - 1.0));
        Some(beta)
    } else {
        None
    };

    let alpha_error = residuals.map(|residuals| {
        let r1 = residuals.term(1);
        // Where the term-1 residual is zero, so is the signal; zero signals are
        // then set to 1. The order matters.
        let t1_guarded = Zip::from(&t1).and(r1).map_collect(|&t, &r| {
            let t = if r == 0.0 { 0.0 } else { t };
            if t == 0.0 {
                1.0
            } else {
                t
            }
        });
        let frac0 = masked_divide(residuals.term(0), t0_guarded.view(), valid.clone());
        let frac1 = masked_divide(r1, t1_guarded.view(), valid.clone());
        let values = Zip::from(&alpha.values)
            .and(&frac0.values)
            .and(&frac1.values)
            .map_collect(|&a, &f0, &f1| a.abs() * (f0 * f0 + f1 * f1).sqrt());
        MaskedMap {
            values,
            valid: valid.clone(),
        }
    });

    Ok(Some(SpectralIndexMaps {
        alpha,
        beta,
        alpha_error,
    }))
}

/// The spectral index of the primary beam itself, for information. Beam
/// pixels below `pb_threshold` get term 0 set to 1 and term 1 set to 0, and the
/// result is masked where term 0 is at or below `pb_threshold`. Returns `None`
/// if there are fewer than 2 Taylor terms.
pub fn calc_pb_alpha(beam: &TaylorMaps, pb_threshold: f64) -> Option<MaskedMap> {
    if beam.nterms() < 2 {
        return None;
    }

    let t0 = beam.term(0);
    let t0_guarded = t0.mapv(|v| if v < pb_threshold { 1.0 } else { v });
    let t1 = Zip::from(beam.term(1))
        .and(t0)
        .map_collect(|&v, &p| if p < pb_threshold { 0.0 } else { v });
    Some(masked_divide(
        t1.view(),
        t0_guarded.view(),
        validity_mask(t0, pb_threshold),
    ))
}
