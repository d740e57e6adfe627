// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision.
 */

/// The default number of Taylor terms.
pub const DEFAULT_NTERMS: usize = 2;

/// The default image threshold. Pixels with a term-0 value at or below this
/// are masked in spectral-index products.
pub const DEFAULT_THRESHOLD: &str = "1mJy";

/// The default primary-beam threshold (a.k.a. "pbmin"). Beam pixels at or below
/// this level are not fitted and masked in PB-corrected products.
pub const DEFAULT_PB_MIN: f64 = 0.001;

/// The most Taylor terms that can be fitted to a beam cube.
pub const MAX_FIT_TERMS: usize = 5;

/// The most Taylor terms for which one polynomial can be divided by another.
pub const MAX_DIVIDE_TERMS: usize = 3;

/// Term-0 values below this are replaced with 1 before computing spectral
/// indices, regardless of the threshold.
pub const INTENSITY_FLOOR: f64 = 1e-6;

/// If the ratio of the smallest to the largest singular value of the
/// diagonally-scaled Hessian is below this, the Hessian is treated as
/// singular.
pub const SINGULAR_VALUE_RATIO_LIMIT: f64 = 1e-12;
