// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spectral-window (SPW) selections.
//!
//! A selection string looks like the CASA SPW syntax, e.g.
//! `0:880~933MHz;960~1010MHz,0:1100~1300MHz` or `100~200`. Comma-separated
//! clauses are independent; each clause may have a leading `<spw>:` token,
//! and may hold several semicolon-separated ranges. A clause with a trailing
//! frequency unit (Hz, kHz, MHz, GHz; case insensitive) selects frequencies,
//! otherwise it selects channel indices. A range without a `~` is a single
//! point.
//!
//! An empty selection string means "the whole band".

mod error;

pub use error::SelectionFormatError;

use std::fmt::Display;
use std::str::FromStr;

use itertools::Itertools;
use log::trace;
use serde::Serialize;
use vec1::Vec1;

use crate::unit_parsing::{split_unit_suffix, FreqFormat};

/// The unit of the bounds of a [`FrequencyRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionUnit {
    /// The bounds are channel indices.
    Channel,

    /// The bounds are physical frequencies in this unit.
    Freq(FreqFormat),
}

impl SelectionUnit {
    /// The factor that converts a bound into Hz. Channel indices don't have a
    /// physical unit, so this is 1 for them.
    pub fn multiplier(self) -> f64 {
        match self {
            SelectionUnit::Channel => 1.0,
            SelectionUnit::Freq(f) => f.multiplier(),
        }
    }
}

impl Display for SelectionUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionUnit::Channel => Ok(()),
            SelectionUnit::Freq(format) => write!(f, "{format}"),
        }
    }
}

/// One atomic range of a selection. The bounds are kept in the unit they were
/// written in; `lower <= upper` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRange {
    /// The SPW token preceding a `:`, if there was one (e.g. "0" in
    /// "0:100~200"). Only kept for diagnostics.
    pub spw: Option<String>,

    pub unit: SelectionUnit,

    pub lower: f64,

    pub upper: f64,
}

impl FrequencyRange {
    pub fn is_channel_indexed(&self) -> bool {
        matches!(self.unit, SelectionUnit::Channel)
    }

    /// Is this range a single channel or frequency?
    pub fn is_single(&self) -> bool {
        self.lower == self.upper
    }
}

impl Display for FrequencyRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(spw) = &self.spw {
            write!(f, "{spw}:")?;
        }
        if self.is_single() {
            write!(f, "{}{}", self.lower, self.unit)
        } else {
            write!(f, "{}~{}{}", self.lower, self.upper, self.unit)
        }
    }
}

/// All of the ranges of a non-empty selection, in the order they were
/// written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSet(Vec1<FrequencyRange>);

impl SelectionSet {
    pub fn ranges(&self) -> &[FrequencyRange] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyRange> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A selection set is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Display for SelectionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

/// A parsed SPW selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SpwSelection {
    /// No selection was given; use the whole observed band.
    Whole,

    Ranges(SelectionSet),
}

impl SpwSelection {
    pub fn parse(s: &str) -> Result<SpwSelection, SelectionFormatError> {
        parse_spw_selection(s)
    }
}

impl FromStr for SpwSelection {
    type Err = SelectionFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spw_selection(s)
    }
}

impl Display for SpwSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpwSelection::Whole => write!(f, "<whole band>"),
            SpwSelection::Ranges(set) => write!(f, "{set}"),
        }
    }
}

/// Parse an SPW selection string. Nothing malformed is silently dropped; any
/// bad token fails the whole parse.
pub fn parse_spw_selection(s: &str) -> Result<SpwSelection, SelectionFormatError> {
    if s.trim().is_empty() {
        return Ok(SpwSelection::Whole);
    }

    let mut ranges = vec![];
    for clause in s.split(',') {
        ranges.extend(parse_clause(clause)?);
    }
    trace!("Parsed SPW selection '{s}' into {ranges:?}");

    // Every clause yields at least one range or an error, so this can't fail.
    let ranges = Vec1::try_from_vec(ranges).map_err(|_| SelectionFormatError::EmptyClause {
        clause: s.to_string(),
    })?;
    Ok(SpwSelection::Ranges(SelectionSet(ranges)))
}

fn parse_clause(clause: &str) -> Result<Vec<FrequencyRange>, SelectionFormatError> {
    let trimmed = clause.trim();
    if trimmed.is_empty() {
        return Err(SelectionFormatError::EmptyClause {
            clause: clause.to_string(),
        });
    }

    let (spw, ranges_str) = match trimmed.split_once(':') {
        Some((spw, rest)) => {
            let spw = spw.trim();
            ((!spw.is_empty()).then(|| spw.to_string()), rest)
        }
        None => (None, trimmed),
    };

    // The trailing alphabetic token decides the unit of the whole clause.
    let (_, unit_token) = split_unit_suffix(ranges_str);
    let unit = if unit_token.is_empty() {
        SelectionUnit::Channel
    } else {
        match FreqFormat::from_token(unit_token) {
            Some(f) => SelectionUnit::Freq(f),
            None => {
                return Err(SelectionFormatError::UnknownUnit {
                    clause: trimmed.to_string(),
                    unit: unit_token.to_string(),
                })
            }
        }
    };

    let mut ranges = vec![];
    for range in ranges_str.split(';') {
        if range.trim().is_empty() {
            return Err(SelectionFormatError::EmptyClause {
                clause: trimmed.to_string(),
            });
        }

        let mut bounds = range.split('~');
        // `split` always yields at least one item.
        let first = bounds.next().unwrap_or_default();
        let second = bounds.next();
        if bounds.next().is_some() {
            return Err(SelectionFormatError::TooManySeparators {
                clause: trimmed.to_string(),
                range: range.trim().to_string(),
            });
        }

        let a = parse_bound(first, unit, trimmed)?;
        let b = match second {
            Some(second) => parse_bound(second, unit, trimmed)?,
            None => a,
        };
        ranges.push(FrequencyRange {
            spw: spw.clone(),
            unit,
            lower: a.min(b),
            upper: a.max(b),
        });
    }

    Ok(ranges)
}

/// Parse one bound. A bound may repeat the clause's unit (e.g. the "933MHz"
/// in "880MHz~933MHz"), but must not carry a different one.
fn parse_bound(token: &str, unit: SelectionUnit, clause: &str) -> Result<f64, SelectionFormatError> {
    let (number, suffix) = split_unit_suffix(token);
    if !suffix.is_empty() {
        match (FreqFormat::from_token(suffix), unit) {
            (Some(f), SelectionUnit::Freq(clause_unit)) if f == clause_unit => (),
            (Some(_), _) => {
                return Err(SelectionFormatError::MixedUnits {
                    clause: clause.to_string(),
                    token: token.trim().to_string(),
                })
            }
            (None, _) => {
                return Err(SelectionFormatError::UnknownUnit {
                    clause: clause.to_string(),
                    unit: suffix.to_string(),
                })
            }
        }
    }

    number
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| SelectionFormatError::BadNumber {
            clause: clause.to_string(),
            token: token.trim().to_string(),
        })
}
