// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with dividing Taylor polynomials.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DivideError {
    #[error("To divide out the PB spectrum, the PB coefficients ({denominator}) and target images ({numerator}) must have the same number of Taylor terms")]
    TermCountMismatch { numerator: usize, denominator: usize },

    #[error("The image maps have shape {numerator:?}, but the PB maps have shape {denominator:?}")]
    MapShapeMismatch {
        numerator: (usize, usize),
        denominator: (usize, usize),
    },

    #[error("Cannot divide polynomials with {nterms} Taylor terms; between 1 and {max} are supported")]
    UnsupportedOrder { nterms: usize, max: usize },
}
