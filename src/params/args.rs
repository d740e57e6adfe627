// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::{fs::File, io::Read, path::Path, str::FromStr};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use super::{Action, PbcorArgsError, PbcorParams};
use crate::{
    constants::{DEFAULT_NTERMS, DEFAULT_PB_MIN, DEFAULT_THRESHOLD},
    printers::{InfoPrinter, Warn},
    unit_parsing::{parse_flux_density, parse_freq},
};

lazy_static::lazy_static! {
    static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");
}

#[derive(Debug, Display, EnumIter, EnumString)]
enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

/// User-facing arguments for wide-band PB correction. All fields are optional
/// so that they may be specified in (and merged from) an argument file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PbcorArgs {
    /// The number of Taylor terms. Default: 2
    pub nterms: Option<usize>,

    /// Image threshold, with or without a flux-density unit (bare numbers are
    /// Jy). Default: "1mJy"
    pub threshold: Option<String>,

    /// "pbcor" or "calcalpha". Default: "pbcor"
    pub action: Option<String>,

    /// The reference frequency, with or without a frequency unit (bare
    /// numbers are GHz). If not given, the image's reference frequency is
    /// used.
    pub reffreq: Option<String>,

    /// Primary-beam threshold. Default: 0.001
    pub pbmin: Option<f64>,

    /// Weights for each beam plane. Default: all ones.
    pub weights: Option<Vec<f64>>,
}

impl PbcorArgs {
    /// Read arguments from a toml or json file. The type is determined by the
    /// file extension.
    pub fn from_arg_file(arg_file: &Path) -> Result<PbcorArgs, PbcorArgsError> {
        debug!("Attempting to parse argument file {}", arg_file.display());

        let arg_file_type = arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());
        let mut contents = String::new();
        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                File::open(arg_file)?.read_to_string(&mut contents)?;
                toml::from_str(&contents).map_err(|err| PbcorArgsError::ArgFile {
                    file: arg_file.display().to_string(),
                    err: err.to_string(),
                })
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                File::open(arg_file)?.read_to_string(&mut contents)?;
                serde_json::from_str(&contents).map_err(|err| PbcorArgsError::ArgFile {
                    file: arg_file.display().to_string(),
                    err: err.to_string(),
                })
            }
            None => Err(PbcorArgsError::UnrecognisedArgFileExt {
                file: arg_file.display().to_string(),
                valid: ARG_FILE_TYPES_COMMA_SEPARATED.as_str(),
            }),
        }
    }

    /// Merge two sets of arguments. Arguments in `self` take priority.
    pub fn merge(self, other: PbcorArgs) -> PbcorArgs {
        PbcorArgs {
            nterms: self.nterms.or(other.nterms),
            threshold: self.threshold.or(other.threshold),
            action: self.action.or(other.action),
            reffreq: self.reffreq.or(other.reffreq),
            pbmin: self.pbmin.or(other.pbmin),
            weights: self.weights.or(other.weights),
        }
    }

    /// Validate the arguments. `image_ref_freq_ghz` is the reference frequency
    /// of the input images, used when no reference frequency was specified.
    pub fn parse(self, image_ref_freq_ghz: Option<f64>) -> Result<PbcorParams, PbcorArgsError> {
        let PbcorArgs {
            nterms,
            threshold,
            action,
            reffreq,
            pbmin,
            weights,
        } = self;

        let nterms = nterms.unwrap_or(DEFAULT_NTERMS);
        if nterms < 1 {
            return Err(PbcorArgsError::NoTerms);
        }

        let threshold = threshold.as_deref().unwrap_or(DEFAULT_THRESHOLD);
        let threshold_jy = match parse_flux_density(threshold)? {
            (t, Some(unit)) => t * unit.to_jy(),
            (t, None) => t,
        };
        if threshold_jy < 0.0 || !threshold_jy.is_finite() {
            return Err(PbcorArgsError::BadThreshold(threshold.to_string()));
        }

        let action = match action {
            Some(a) => Action::from_str(&a.to_lowercase())
                .map_err(|_| PbcorArgsError::UnknownAction(a))?,
            None => Action::PbCor,
        };

        let ref_freq_ghz = match reffreq.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match parse_freq(s)? {
                (f, Some(unit)) => f * unit.to_ghz(),
                (f, None) => f,
            },
            _ => {
                let f = image_ref_freq_ghz.ok_or(PbcorArgsError::NoRefFreq)?;
                format!("No reference frequency specified; using the image's ({f} GHz)").warn();
                f
            }
        };
        if ref_freq_ghz <= 0.0 || !ref_freq_ghz.is_finite() {
            return Err(PbcorArgsError::BadRefFreq(ref_freq_ghz));
        }

        let pb_threshold = pbmin.unwrap_or(DEFAULT_PB_MIN);
        if pb_threshold < 0.0 || !pb_threshold.is_finite() {
            return Err(PbcorArgsError::BadPbThreshold(pb_threshold));
        }

        let weights = match weights {
            None => None,
            Some(w) => {
                if w.len() < nterms {
                    return Err(PbcorArgsError::TooFewWeights {
                        num_weights: w.len(),
                        nterms,
                    });
                }
                if w.iter().any(|&w| w < 0.0 || !w.is_finite()) {
                    return Err(PbcorArgsError::BadWeights);
                }
                Vec1::try_from_vec(w).ok()
            }
        };

        let mut printer = InfoPrinter::new("Wide-band PB correction".into());
        printer.push_line(format!("Action: {action}").into());
        printer.push_line(format!("Taylor terms: {nterms}").into());
        printer.push_line(format!("Reference frequency: {ref_freq_ghz} GHz").into());
        printer.push_line(format!("Image threshold: {threshold_jy} Jy").into());
        if action == Action::PbCor {
            printer.push_line(format!("PB threshold: {pb_threshold}").into());
            match &weights {
                Some(w) => printer.push_line(format!("Beam weights: [{}]", w.iter().join(", ")).into()),
                None => printer.push_line("Beam weights: all ones".into()),
            }
        }
        printer.display();

        Ok(PbcorParams {
            nterms,
            threshold_jy,
            action,
            ref_freq_ghz,
            pb_threshold,
            weights,
        })
    }
}
