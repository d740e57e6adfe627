// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all PB-correction-related errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PbcorError {
    #[error("PB correction was requested, but no beam cube and/or beam frequencies were supplied")]
    MissingBeam,

    #[error("Expected {expected} Taylor maps, but got {got}")]
    TaylorTermCount { expected: usize, got: usize },

    #[error("{0}")]
    Args(#[from] crate::params::PbcorArgsError),

    #[error("{0}")]
    Taylor(#[from] crate::taylor::TaylorError),

    #[error("{0}")]
    Fit(#[from] crate::fit::FitError),

    #[error("{0}")]
    Divide(#[from] crate::divide::DivideError),

    #[error("{0}")]
    SpectralIndex(#[from] crate::spectral_index::SpectralIndexError),
}
