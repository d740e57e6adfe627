// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with assembling Taylor-coefficient maps.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TaylorError {
    #[error("No Taylor-term maps were supplied")]
    NoTerms,

    #[error("The map for Taylor term {term} has shape {got:?}, but term 0 has shape {expected:?}")]
    ShapeMismatch {
        term: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },
}
