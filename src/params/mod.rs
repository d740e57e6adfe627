// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters for wide-band PB correction.
//!
//! [`PbcorArgs`] is unparsed, user-facing configuration; every field is
//! optional so that it can come from an argument file and be merged with other
//! sources. [`PbcorArgs::parse`] validates it into [`PbcorParams`], which are
//! ready to be used directly.

mod args;
mod error;

pub use args::PbcorArgs;
pub use error::PbcorArgsError;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

/// What should be done with the inputs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Fit the beam, divide it out of the Taylor maps, then compute spectral
    /// indices from the corrected maps.
    #[strum(serialize = "pbcor")]
    PbCor,

    /// Only compute spectral indices from the supplied Taylor maps.
    #[strum(serialize = "calcalpha")]
    CalcAlpha,
}

/// Validated parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PbcorParams {
    /// The number of Taylor terms.
    pub nterms: usize,

    /// Image threshold \[Jy\].
    pub threshold_jy: f64,

    pub action: Action,

    /// The reference frequency of the Taylor expansion \[GHz\].
    pub ref_freq_ghz: f64,

    /// Beam pixels at or below this level are not fitted and are masked in
    /// PB-corrected products.
    pub pb_threshold: f64,

    /// Weights of the beam planes. If not specified, all ones.
    pub weights: Option<Vec1<f64>>,
}
