// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Taylor-coefficient maps and the small helpers shared by all stages of PB
//! correction.
//!
//! A polynomial in normalised frequency offset is represented by one 2-D map
//! per Taylor term ([`TaylorMaps`]), term 0 first. Derived products carry a
//! validity mask alongside their values ([`MaskedMap`]).

mod error;

pub use error::TaylorError;

use ndarray::prelude::*;
use ndarray::Zip;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

/// An ordered list of per-pixel Taylor-coefficient maps. All maps have the
/// same shape, and there is always at least one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct TaylorMaps {
    terms: Vec1<Array2<f64>>,
}

impl TaylorMaps {
    /// Bundle maps into a polynomial. The first map is the coefficient of
    /// offset^0.
    pub fn new(terms: Vec1<Array2<f64>>) -> Result<TaylorMaps, TaylorError> {
        let expected = terms.first().dim();
        for (term, map) in terms.iter().enumerate().skip(1) {
            if map.dim() != expected {
                return Err(TaylorError::ShapeMismatch {
                    term,
                    expected,
                    got: map.dim(),
                });
            }
        }

        Ok(TaylorMaps { terms })
    }

    /// Like [`TaylorMaps::new`], but from a plain `Vec`.
    pub fn try_from_vec(terms: Vec<Array2<f64>>) -> Result<TaylorMaps, TaylorError> {
        let terms = Vec1::try_from_vec(terms).map_err(|_| TaylorError::NoTerms)?;
        TaylorMaps::new(terms)
    }

    /// Split a coefficient cube with shape (X, Y, nterms) into one map per
    /// term.
    pub(crate) fn from_coeff_cube(coeffs: ArrayView3<f64>) -> TaylorMaps {
        let terms = coeffs
            .axis_iter(Axis(2))
            .map(|term| term.to_owned())
            .collect::<Vec<_>>();
        TaylorMaps {
            terms: Vec1::try_from_vec(terms).expect("coefficient cube has at least one term"),
        }
    }

    /// The number of Taylor terms.
    pub fn nterms(&self) -> usize {
        self.terms.len()
    }

    /// The (X, Y) shape shared by all maps.
    pub fn dim(&self) -> (usize, usize) {
        self.terms.first().dim()
    }

    /// Get the map of a single term.
    ///
    /// # Panics
    ///
    /// Panics if `term >= self.nterms()`.
    pub fn term(&self, term: usize) -> ArrayView2<f64> {
        self.terms[term].view()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Array2<f64>> {
        self.terms.iter()
    }

    pub fn into_vec(self) -> Vec<Array2<f64>> {
        self.terms.into_vec()
    }

    pub fn into_terms(self) -> Vec1<Array2<f64>> {
        self.terms
    }

    /// Evaluate the polynomial at a normalised frequency offset.
    pub fn evaluate(&self, offset: f64) -> Array2<f64> {
        let mut out = Array2::zeros(self.dim());
        // Horner's method, from the highest term down.
        for map in self.terms.iter().rev() {
            Zip::from(&mut out)
                .and(map)
                .for_each(|o, &c| *o = *o * offset + c);
        }
        out
    }
}

/// Values with a per-pixel validity mask. Values at invalid pixels are still
/// well defined (i.e. finite wherever the inputs were), but should not be
/// interpreted by downstream consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedMap {
    pub values: Array2<f64>,
    pub valid: Array2<bool>,
}

impl MaskedMap {
    /// The number of valid pixels.
    pub fn num_valid(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// Get a copy of the values with invalid pixels set to NaN.
    pub fn to_nan_masked(&self) -> Array2<f64> {
        Zip::from(&self.values)
            .and(&self.valid)
            .map_collect(|&v, &valid| if valid { v } else { f64::NAN })
    }
}

/// Pixels are valid where `reference` is strictly greater than `threshold`.
pub fn validity_mask(reference: ArrayView2<f64>, threshold: f64) -> Array2<bool> {
    reference.mapv(|v| v > threshold)
}

/// Divide `numerator` by `denominator` element-wise and attach `valid` as the
/// mask of the quotient. Zero denominators are treated as 1, so the quotient
/// is never infinite because of a masked-out pixel.
///
/// # Panics
///
/// Panics if the shapes of the inputs differ.
pub fn masked_divide(
    numerator: ArrayView2<f64>,
    denominator: ArrayView2<f64>,
    valid: Array2<bool>,
) -> MaskedMap {
    let values = Zip::from(numerator)
        .and(denominator)
        .par_map_collect(|&n, &d| if d == 0.0 { n } else { n / d });
    assert_eq!(values.dim(), valid.dim(), "quotient and mask shapes differ");
    MaskedMap { values, valid }
}

/// A spectral axis, from which the frequencies of the beam planes are
/// derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyAxis {
    /// Regularly-spaced channels; channel `c` is at `reference_hz + c *
    /// increment_hz`.
    Linear {
        reference_hz: f64,
        increment_hz: f64,
        count: usize,
    },

    /// Explicitly listed channel frequencies \[Hz\].
    Tabular(Vec<f64>),
}

impl FrequencyAxis {
    pub fn len(&self) -> usize {
        match self {
            FrequencyAxis::Linear { count, .. } => *count,
            FrequencyAxis::Tabular(freqs) => freqs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The channel frequencies \[GHz\].
    pub fn freqs_ghz(&self) -> Vec<f64> {
        match self {
            FrequencyAxis::Linear {
                reference_hz,
                increment_hz,
                count,
            } => (0..*count)
                .map(|c| (reference_hz + c as f64 * increment_hz) / 1e9)
                .collect(),
            FrequencyAxis::Tabular(freqs) => freqs.iter().map(|f| f / 1e9).collect(),
        }
    }
}

/// Convert frequencies into normalised offsets from a reference frequency, i.e.
/// `(f - ref) / ref`. Both must have the same units.
pub fn normalised_offsets(freqs: &[f64], ref_freq: f64) -> Vec<f64> {
    freqs.iter().map(|f| (f - ref_freq) / ref_freq).collect()
}
