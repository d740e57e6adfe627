// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Division of one Taylor polynomial by another, pixel by pixel.
//!
//! Both polynomials are treated as power series in the frequency offset `x`,
//! and the quotient is truncated to the same number of terms. For
//! `nterms = 3`:
//!
//! ```text
//! q0 = d0^2 n0 / det
//! q1 = (-d0 d1 n0 + d0^2 n1) / det
//! q2 = ((d1^2 - d0 d2) n0 - d0 d1 n1 + d0^2 n2) / det
//! ```
//!
//! where `det = d0^nterms` (or 1 where `d0` is 0).

mod error;
#[cfg(test)]
mod tests;

pub use error::DivideError;

use ndarray::prelude::*;
use ndarray::Zip;
use vec1::Vec1;

use crate::{
    constants::MAX_DIVIDE_TERMS,
    taylor::{validity_mask, MaskedMap, TaylorMaps},
};

/// Divide the `numerator` polynomial (e.g. sky Taylor maps) by the
/// `denominator` polynomial (e.g. beam Taylor maps).
pub fn divide_taylor(
    numerator: &TaylorMaps,
    denominator: &TaylorMaps,
) -> Result<TaylorMaps, DivideError> {
    let nterms = numerator.nterms();
    if denominator.nterms() != nterms {
        return Err(DivideError::TermCountMismatch {
            numerator: nterms,
            denominator: denominator.nterms(),
        });
    }
    if numerator.dim() != denominator.dim() {
        return Err(DivideError::MapShapeMismatch {
            numerator: numerator.dim(),
            denominator: denominator.dim(),
        });
    }
    if !(1..=MAX_DIVIDE_TERMS).contains(&nterms) {
        return Err(DivideError::UnsupportedOrder {
            nterms,
            max: MAX_DIVIDE_TERMS,
        });
    }

    let (num_x, num_y) = numerator.dim();
    let mut quotient: Array3<f64> = Array3::zeros((num_x, num_y, nterms));
    Zip::indexed(quotient.lanes_mut(Axis(2))).par_for_each(|(x, y), mut q| {
        let mut n = [0.0; MAX_DIVIDE_TERMS];
        let mut d = [0.0; MAX_DIVIDE_TERMS];
        for t in 0..nterms {
            n[t] = numerator.term(t)[(x, y)];
            d[t] = denominator.term(t)[(x, y)];
        }
        let mut s = [0.0; MAX_DIVIDE_TERMS];
        divide_series(&n[..nterms], &d[..nterms], &mut s[..nterms]);
        q.assign(&ArrayView1::from(&s[..nterms]));
    });

    Ok(TaylorMaps::from_coeff_cube(quotient.view()))
}

/// As with [`divide_taylor`], but each term of the quotient is masked where
/// term 0 of the `denominator` is at or below `threshold`.
pub fn divide_taylor_masked(
    numerator: &TaylorMaps,
    denominator: &TaylorMaps,
    threshold: f64,
) -> Result<Vec1<MaskedMap>, DivideError> {
    let quotient = divide_taylor(numerator, denominator)?;
    let valid = validity_mask(denominator.term(0), threshold);
    Ok(quotient.into_terms().mapped(|values| MaskedMap {
        values,
        valid: valid.clone(),
    }))
}

/// Divide the truncated series `n` by `d`, writing the result into `q`.
///
/// With `s_0 = n_0` and `s_k = d0^k n_k - sum_{j=1..k} d_j d0^(j-1) s_{k-j}`,
/// the quotient is `q_k = s_k d0^(nterms-1-k) / det`.
fn divide_series(n: &[f64], d: &[f64], q: &mut [f64]) {
    let nterms = q.len();
    let d0 = d[0];
    for k in 0..nterms {
        let mut s = d0.powi(k as i32) * n[k];
        for j in 1..=k {
            s -= d[j] * d0.powi(j as i32 - 1) * q[k - j];
        }
        q[k] = s;
    }

    let det = d0.powi(nterms as i32);
    let det = if det == 0.0 { 1.0 } else { det };
    for (k, q) in q.iter_mut().enumerate() {
        *q *= d0.powi((nterms - 1 - k) as i32) / det;
    }
}
