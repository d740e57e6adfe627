// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with fitting Taylor polynomials to beam samples.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FitError {
    #[error("Mismatch in frequency axes: {num_freqs} frequencies but {num_planes} sample planes")]
    FreqPlaneMismatch { num_freqs: usize, num_planes: usize },

    #[error("Mismatch in lengths of frequencies ({num_freqs}) and weights ({num_weights})")]
    FreqWeightMismatch { num_freqs: usize, num_weights: usize },

    #[error("The weighted Hessian is singular; are there enough distinct frequencies for {nterms} Taylor terms?")]
    SingularSystem { nterms: usize },

    #[error("Cannot fit {nterms} Taylor terms; between 1 and {max} are supported")]
    UnsupportedOrder { nterms: usize, max: usize },
}

impl FitError {
    /// Is this error a shape (length) mismatch between paired inputs?
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            FitError::FreqPlaneMismatch { .. } | FitError::FreqWeightMismatch { .. }
        )
    }
}
