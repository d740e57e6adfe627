// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Wide-band primary-beam correction of multi-term multi-frequency synthesis
(MT-MFS) images.

Sky brightness at each pixel is represented by Taylor coefficients of a
polynomial in the normalised frequency offset `(ν - ν_ref) / ν_ref`. The
primary beam is sampled at a handful of frequencies; this crate fits the same
kind of polynomial to the beam at every pixel ([`fit`]), divides the sky
polynomial by the beam polynomial ([`divide`]) and derives spectral index,
curvature and error maps from the result ([`spectral_index`]). [`pbcor`] ties
the stages together.

All stages are stateless functions over `ndarray` arrays; reading and writing
images is left to the caller.
 */

pub mod constants;
pub mod divide;
mod error;
pub mod fit;
pub mod params;
pub mod pbcor;
mod printers;
pub mod spectral_index;
pub mod taylor;
pub mod unit_parsing;

use crossbeam_utils::atomic::AtomicCell;

// Re-exports.
pub use divide::{divide_taylor, divide_taylor_masked, DivideError};
pub use error::PbcorError;
pub use fit::{fit_taylor_coeffs, FitError};
pub use params::{Action, PbcorArgs, PbcorArgsError, PbcorParams};
pub use pbcor::{PbCorrector, PbcorInputs, PbcorProducts};
pub use printers::display_warnings;
pub use spectral_index::{calc_pb_alpha, calc_spectral_index, SpectralIndexError, SpectralIndexMaps};
pub use taylor::{
    masked_divide, normalised_offsets, validity_mask, FrequencyAxis, MaskedMap, TaylorError,
    TaylorMaps,
};

/// Should progress bars be drawn? Off by default, so that library users don't
/// get unexpected output on their terminals.
pub static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
