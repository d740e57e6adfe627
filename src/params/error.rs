// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::unit_parsing::UnitParseError;

#[derive(Error, Debug)]
pub enum PbcorArgsError {
    #[error("The number of Taylor terms must be at least 1")]
    NoTerms,

    #[error("Image threshold '{0}' must be a non-negative number")]
    BadThreshold(String),

    #[error("PB threshold {0} must be a non-negative number")]
    BadPbThreshold(f64),

    #[error("No reference frequency was specified, and the images don't provide one")]
    NoRefFreq,

    #[error("Reference frequency {0} GHz must be positive")]
    BadRefFreq(f64),

    #[error("Unknown action '{0}'; valid actions are 'pbcor' and 'calcalpha'")]
    UnknownAction(String),

    #[error("{num_weights} beam weights were given, but {nterms} Taylor terms need at least as many")]
    TooFewWeights { num_weights: usize, nterms: usize },

    #[error("Beam weights must be non-negative finite numbers")]
    BadWeights,

    #[error("Argument file '{file}' doesn't have a recognised file extension! Valid extensions are: {valid}")]
    UnrecognisedArgFileExt { file: String, valid: &'static str },

    #[error("Couldn't decode argument file '{file}': {err}")]
    ArgFile { file: String, err: String },

    #[error(transparent)]
    UnitParse(#[from] UnitParseError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
