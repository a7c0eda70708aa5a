// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to parse strings into plain numbers or some quantity with a unit.

mod error;

pub use error::UnitParseError;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr, Display, Serialize)]
#[allow(non_camel_case_types)]
pub enum TimeFormat {
    /// Seconds
    s,

    /// Milliseconds
    ms,

    /// Minutes
    min,

    /// Hours
    h,
}

impl TimeFormat {
    /// The number of seconds in one of this unit.
    pub fn seconds(self) -> f64 {
        match self {
            TimeFormat::s => 1.0,
            TimeFormat::ms => 1e-3,
            TimeFormat::min => 60.0,
            TimeFormat::h => 3600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr, Display, Serialize)]
#[allow(non_camel_case_types)]
pub enum FreqFormat {
    /// Hertz
    Hz,

    /// kiloHertz
    kHz,

    /// MegaHertz
    MHz,

    /// GigaHertz
    GHz,
}

impl FreqFormat {
    /// The number of Hz in one of this unit.
    pub fn multiplier(self) -> f64 {
        match self {
            FreqFormat::Hz => 1.0,
            FreqFormat::kHz => 1e3,
            FreqFormat::MHz => 1e6,
            FreqFormat::GHz => 1e9,
        }
    }

    /// Match a unit token against the supported frequency units. The match is
    /// case insensitive, but must cover the whole token, so "xhz" is not a
    /// match for anything.
    pub fn from_token(token: &str) -> Option<FreqFormat> {
        let token = token.trim();
        FreqFormat::iter().find(|f| {
            let f_str: &'static str = (*f).into();
            f_str.eq_ignore_ascii_case(token)
        })
    }
}

/// Split a string like "1.5 MHz" into its numerical part and its (possibly
/// empty) trailing alphabetic part. Both parts are trimmed.
pub(crate) fn split_unit_suffix(s: &str) -> (&str, &str) {
    let s = s.trim();
    let prefix = s.trim_end_matches(char::is_alphabetic);
    (prefix.trim(), &s[prefix.len()..])
}

/// Parse a string that may have a unit of time attached to it.
pub fn parse_time(s: &str) -> Result<(f64, Option<TimeFormat>), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    // That didn't work; let's search over our supported formats.
    let (prefix, suffix) = split_unit_suffix(s);
    for time_format in TimeFormat::iter() {
        let time_format_str: &'static str = time_format.into();
        if suffix.eq_ignore_ascii_case(time_format_str) {
            let number: f64 = match prefix.parse() {
                Ok(n) => n,
                Err(_) => return Err(UnitParseError::GotTimeUnitButCantParse(s.to_string())),
            };
            return Ok((number, Some(time_format)));
        }
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "time",
    })
}

/// Parse a string that may have a unit of frequency attached to it.
pub fn parse_freq(s: &str) -> Result<(f64, Option<FreqFormat>), UnitParseError> {
    // Try to parse a naked number.
    let maybe_number: Option<f64> = s.trim().parse().ok();
    if let Some(number) = maybe_number {
        return Ok((number, None));
    };

    let (prefix, suffix) = split_unit_suffix(s);
    if let Some(freq_format) = FreqFormat::from_token(suffix) {
        let number: f64 = match prefix.parse() {
            Ok(n) => n,
            Err(_) => return Err(UnitParseError::GotFreqUnitButCantParse(s.to_string())),
        };
        return Ok((number, Some(freq_format)));
    }

    // If we made it this far, we don't know how to parse the string.
    Err(UnitParseError::Unknown {
        input: s.to_string(),
        unit_type: "frequency",
    })
}

/// Parse a string that may have a unit of frequency attached to it, and return
/// the quantity in Hz. A naked number is taken to already be in Hz.
pub fn parse_freq_hz(s: &str) -> Result<f64, UnitParseError> {
    let (quantity, unit) = parse_freq(s)?;
    Ok(quantity * unit.map(FreqFormat::multiplier).unwrap_or(1.0))
}
