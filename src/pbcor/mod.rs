// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wide-band PB correction from start to finish.
//!
//! For [`Action::PbCor`], beam samples are fitted with a Taylor polynomial, the
//! sky polynomial is divided by it and spectral indices are computed from the
//! corrected maps. For [`Action::CalcAlpha`], only the spectral indices of the
//! supplied maps are computed.


use itertools::Itertools;
use log::{debug, info};
use ndarray::prelude::*;
use vec1::Vec1;

use crate::{
    divide::divide_taylor_masked,
    fit::fit_taylor_coeffs,
    params::{Action, PbcorParams},
    printers::{display_warnings, Warn},
    spectral_index::{calc_pb_alpha, calc_spectral_index, SpectralIndexMaps},
    taylor::{normalised_offsets, FrequencyAxis, MaskedMap, TaylorMaps},
    PbcorError,
};

/// Everything [`PbCorrector::run`] works on. The beam inputs are only needed
/// for [`Action::PbCor`].
#[derive(Debug, Clone, Copy)]
pub struct PbcorInputs<'a> {
    /// Beam samples with shape (X, Y, N).
    pub beam_cube: Option<ArrayView3<'a, f64>>,

    /// The frequencies of the N beam planes.
    pub beam_freqs: Option<&'a FrequencyAxis>,

    /// Sky Taylor maps.
    pub taylor: &'a TaylorMaps,

    /// Residual Taylor maps, used for spectral-index errors.
    pub residuals: Option<&'a TaylorMaps>,
}

/// The products of a run. Fields are `None` when they weren't requested or
/// couldn't be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PbcorProducts {
    /// The fitted beam polynomial.
    pub beam: Option<TaylorMaps>,

    /// The spectral index of the beam.
    pub pb_alpha: Option<MaskedMap>,

    /// PB-corrected sky Taylor maps.
    pub corrected: Option<Vec1<MaskedMap>>,

    pub spectral_index: Option<SpectralIndexMaps>,
}

pub struct PbCorrector {
    params: PbcorParams,
}

impl PbCorrector {
    pub fn new(params: PbcorParams) -> PbCorrector {
        PbCorrector { params }
    }

    pub fn params(&self) -> &PbcorParams {
        &self.params
    }

    /// Run the configured action. Deferred warnings are displayed before
    /// returning.
    pub fn run(&self, inputs: PbcorInputs) -> Result<PbcorProducts, PbcorError> {
        let result = self.run_inner(inputs);
        display_warnings();
        result
    }

    fn run_inner(&self, inputs: PbcorInputs) -> Result<PbcorProducts, PbcorError> {
        let PbcorParams {
            nterms,
            threshold_jy,
            action,
            ref_freq_ghz,
            pb_threshold,
            ref weights,
        } = self.params;

        if inputs.taylor.nterms() != nterms {
            return Err(PbcorError::TaylorTermCount {
                expected: nterms,
                got: inputs.taylor.nterms(),
            });
        }

        match action {
            Action::CalcAlpha => {
                info!("Computing spectral index of {nterms} Taylor maps");
                let spectral_index =
                    calc_spectral_index(inputs.taylor, inputs.residuals, threshold_jy)?;
                Ok(PbcorProducts {
                    beam: None,
                    pb_alpha: None,
                    corrected: None,
                    spectral_index,
                })
            }

            Action::PbCor => {
                let (beam_cube, beam_freqs) = match (inputs.beam_cube, inputs.beam_freqs) {
                    (Some(c), Some(f)) => (c, f),
                    _ => return Err(PbcorError::MissingBeam),
                };

                let freqs_ghz = beam_freqs.freqs_ghz();
                info!(
                    "Using PBs at [{}] GHz with reference frequency {ref_freq_ghz} GHz",
                    freqs_ghz.iter().map(|f| format!("{f:.4}")).join(", ")
                );
                if weights.is_none() {
                    debug!("No beam weights specified; using all ones");
                }
                let offsets = normalised_offsets(&freqs_ghz, ref_freq_ghz);
                debug!("Normalised frequency offsets: {offsets:?}");

                let beam = fit_taylor_coeffs(
                    &offsets,
                    beam_cube,
                    weights.as_ref().map(|w| w.as_slice()),
                    pb_threshold,
                    nterms,
                )?;

                let pb_alpha = calc_pb_alpha(&beam, pb_threshold);
                if pb_alpha.is_none() {
                    "Only one Taylor term; not computing the PB spectral index".warn();
                }

                info!("Dividing {nterms} Taylor maps by the PB polynomial");
                let corrected = divide_taylor_masked(inputs.taylor, &beam, pb_threshold)?;
                let corrected_maps =
                    TaylorMaps::try_from_vec(corrected.iter().map(|m| m.values.clone()).collect())?;

                let spectral_index =
                    calc_spectral_index(&corrected_maps, inputs.residuals, threshold_jy)?;

                Ok(PbcorProducts {
                    beam: Some(beam),
                    pb_alpha,
                    corrected: Some(corrected),
                    spectral_index,
                })
            }
        }
    }
}
