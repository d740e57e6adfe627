// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with computing spectral indices.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpectralIndexError {
    #[error("Got {taylor} Taylor-coefficient maps but {residuals} residual maps")]
    TermCountMismatch { taylor: usize, residuals: usize },

    #[error("The Taylor-coefficient maps have shape {taylor:?}, but the residual maps have shape {residuals:?}")]
    MapShapeMismatch {
        taylor: (usize, usize),
        residuals: (usize, usize),
    },
}
