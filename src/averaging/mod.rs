// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Averaging applied when splitting calibrated fields out of the partitioned
//! data, and the split task's arguments for each field.

mod error;
#[cfg(test)]
mod tests;

pub use error::AveragingError;

use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    constants::{DEFAULT_SPEC_AVG, DEFAULT_TIME_AVG},
    filenames::split_vis_name,
    unit_parsing::{parse_freq, parse_time},
};

/// Channel and time bins for the split task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitAveraging {
    /// Channel averaging is only switched on when there are at least 2
    /// channels in a bin.
    pub chan_average: bool,

    pub chan_bin: NonZeroUsize,

    /// Time averaging is always on.
    pub time_average: bool,

    /// \[seconds\]
    pub time_bin_s: f64,
}

impl SplitAveraging {
    /// Make averaging parameters from user input. `spec_avg` is either a number
    /// of channels or a target resolution (e.g. "856kHz"), and `time_avg` is a
    /// time bin (e.g. "8s"; a unitless number is taken as seconds). Defaults
    /// are used for anything not given.
    pub fn new(
        chan_width_hz: Option<f64>,
        spec_avg: Option<&str>,
        time_avg: Option<&str>,
    ) -> Result<SplitAveraging, AveragingError> {
        let chan_bin = parse_chan_bin(chan_width_hz, spec_avg, DEFAULT_SPEC_AVG)?;
        let time_bin_s = parse_time_bin(time_avg.unwrap_or(DEFAULT_TIME_AVG))?;
        Ok(SplitAveraging {
            chan_average: chan_bin.get() >= 2,
            chan_bin,
            time_average: true,
            time_bin_s,
        })
    }

    /// The time bin as the split task wants it, e.g. "8s".
    pub fn time_bin(&self) -> String {
        format!("{}s", self.time_bin_s)
    }
}

/// Arguments for splitting one calibrated field out of the partitioned data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitTaskArgs {
    pub vis: PathBuf,

    pub output_vis: PathBuf,

    pub data_column: &'static str,

    pub field: String,

    /// The same SPW selection that was partitioned.
    pub spw: String,

    /// Flagged data are dropped.
    pub keep_flags: bool,

    pub create_mms: bool,

    pub chan_average: bool,

    pub chan_bin: NonZeroUsize,

    pub time_average: bool,

    /// e.g. "8s"
    pub time_bin: String,

    pub use_wt_spectrum: bool,
}

impl SplitTaskArgs {
    /// The output sits next to `vis` and is a multi-MS only if `keep_mms`.
    pub fn new(
        vis: &Path,
        field: &str,
        spw: &str,
        averaging: &SplitAveraging,
        keep_mms: bool,
    ) -> SplitTaskArgs {
        SplitTaskArgs {
            vis: vis.to_path_buf(),
            output_vis: split_vis_name(vis, field, keep_mms),
            data_column: "corrected",
            field: field.to_string(),
            spw: spw.to_string(),
            keep_flags: false,
            create_mms: keep_mms,
            chan_average: averaging.chan_average,
            chan_bin: averaging.chan_bin,
            time_average: averaging.time_average,
            time_bin: averaging.time_bin(),
            use_wt_spectrum: true,
        }
    }
}

/// Determine a channel bin given a channel width and user input. Use the
/// default if there's no user input.
///
/// If the user input has a unit, it must be a multiple of the channel width.
pub fn parse_chan_bin(
    chan_width_hz: Option<f64>,
    user_input: Option<&str>,
    default: usize,
) -> Result<NonZeroUsize, AveragingError> {
    let factor = match (chan_width_hz, user_input.map(parse_freq)) {
        (_, None) => {
            // "None" indicates we should follow default behaviour.
            default
        }
        // propagate any errors encountered during parsing.
        (_, Some(Err(e))) => return Err(AveragingError::Parse(e)),

        // User input is OK but has no unit.
        (_, Some(Ok((factor, None)))) => {
            // Reject non-integer floats.
            if (factor - factor.round()).abs() > 1e-6 {
                return Err(AveragingError::NotInteger);
            }
            if factor.round() < 1.0 {
                return Err(AveragingError::Zero);
            }

            factor.round() as usize
        }

        // User input has a unit, but there's no channel width to compare it
        // to. Assume there's only one channel.
        (None, Some(Ok((_, Some(_))))) => 1,

        // User input is OK and has a unit.
        (Some(chan_width), Some(Ok((quantity, Some(freq_format))))) => {
            // Scale the quantity by the unit.
            let quantity = quantity * freq_format.multiplier();
            if quantity < f64::EPSILON {
                return Err(AveragingError::Zero);
            }

            let factor = quantity / chan_width;
            // Reject non-integer floats.
            if (factor - factor.round()).abs() > 1e-6 {
                return Err(AveragingError::NotIntegerMultiple {
                    out: quantity,
                    inp: chan_width,
                });
            }

            factor.round() as usize
        }
    };

    NonZeroUsize::new(factor).ok_or(AveragingError::Zero)
}

/// Parse a time bin into seconds.
pub fn parse_time_bin(user_input: &str) -> Result<f64, AveragingError> {
    let (quantity, time_format) = parse_time(user_input)?;
    let seconds = quantity * time_format.map(|f| f.seconds()).unwrap_or(1.0);
    if !(seconds > 0.0 && seconds.is_finite()) {
        return Err(AveragingError::TimeBinNotPositive(seconds));
    }
    Ok(seconds)
}
