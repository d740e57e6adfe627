// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::UnitParseError;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub enum FluxDensityUnit {
    /// Jansky
    Jy,

    /// milliJansky
    mJy,

    /// microJansky
    uJy,
}

impl FluxDensityUnit {
    /// The multiplier converting a value in this unit to Jy.
    pub fn to_jy(self) -> f64 {
        match self {
            FluxDensityUnit::Jy => 1.0,
            FluxDensityUnit::mJy => 1e-3,
            FluxDensityUnit::uJy => 1e-6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub enum FreqUnit {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,
}

impl FreqUnit {
    /// The multiplier converting a value in this unit to GHz.
    pub fn to_ghz(self) -> f64 {
        match self {
            FreqUnit::Hz => 1e-9,
            FreqUnit::kHz => 1e-6,
            FreqUnit::MHz => 1e-3,
            FreqUnit::GHz => 1.0,
        }
    }
}

/// Split a string into its numerical component and any trailing unit. Units
/// are case sensitive; "MJy" is not "mJy".
fn parse_with_unit<U>(s: &str, unit_type: &'static str) -> Result<(f64, Option<U>), UnitParseError>
where
    U: IntoEnumIterator + Into<&'static str> + Copy,
{
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    // That didn't work; let's search over our supported units.
    let prefix = s.trim().trim_end_matches(char::is_alphabetic);
    let suffix = s.trim()[prefix.len()..].trim();
    for unit in U::iter() {
        let unit_str: &'static str = unit.into();
        if suffix == unit_str {
            return match prefix.trim().parse() {
                Ok(number) => Ok((number, Some(unit))),
                Err(_) => Err(UnitParseError::GotUnitButCantParse {
                    input: s.to_string(),
                    unit: unit_str,
                }),
            };
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type,
    })
}

/// Parse a string that may have a unit of flux density attached to it.
pub fn parse_flux_density(s: &str) -> Result<(f64, Option<FluxDensityUnit>), UnitParseError> {
    parse_with_unit(s, "flux density")
}

/// Parse a string that may have a unit of frequency attached to it.
pub fn parse_freq(s: &str) -> Result<(f64, Option<FreqUnit>), UnitParseError> {
    parse_with_unit(s, "frequency")
}
