// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all spw-partition-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::common::ObservationArgsError;
use crate::{
    averaging::AveragingError, params::PipelineParamsError, partition::InvalidBandwidthError,
    spw::SelectionFormatError, unit_parsing::UnitParseError,
};

const SELECTION_HINT: &str = "SPW selections are comma-separated clauses like '0:880~933MHz;960~1010MHz' (frequencies) or '100~200' (channels). Supported units are Hz, kHz, MHz and GHz.";

const BANDWIDTH_HINT: &str = "Bandwidths and channel widths must be positive, and the maximum fractional bandwidth must be in (0, 1].";

const AVERAGING_HINT: &str = "Channel bins are a number of channels or a multiple of the channel width (e.g. 4 or 835.9375kHz); time bins look like 8s.";

/// The *only* publicly visible error from spw-partition. Each error message
/// should include a hint on how to fix it, unless it's "generic".
#[derive(Error, Debug)]
pub enum SpwPartitionError {
    /// A malformed SPW selection.
    #[error("{0}\n\n{SELECTION_HINT}")]
    Selection(String),

    /// Bad bandwidth or channel width inputs.
    #[error("{0}\n\n{BANDWIDTH_HINT}")]
    Bandwidth(String),

    /// Bad averaging inputs.
    #[error("{0}\n\n{AVERAGING_HINT}")]
    Averaging(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files hold the same arguments as the command line, e.g. 'spw = \"100~200\"'.")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<SelectionFormatError> for SpwPartitionError {
    fn from(e: SelectionFormatError) -> Self {
        Self::Selection(e.to_string())
    }
}

impl From<InvalidBandwidthError> for SpwPartitionError {
    fn from(e: InvalidBandwidthError) -> Self {
        Self::Bandwidth(e.to_string())
    }
}

impl From<AveragingError> for SpwPartitionError {
    fn from(e: AveragingError) -> Self {
        Self::Averaging(e.to_string())
    }
}

impl From<PipelineParamsError> for SpwPartitionError {
    fn from(e: PipelineParamsError) -> Self {
        match e {
            PipelineParamsError::Selection(e) => Self::from(e),
            PipelineParamsError::Bandwidth(e) => Self::from(e),
            PipelineParamsError::Averaging(e) => Self::from(e),
        }
    }
}

impl From<ObservationArgsError> for SpwPartitionError {
    fn from(e: ObservationArgsError) -> Self {
        let s = e.to_string();
        match e {
            ObservationArgsError::NoVis | ObservationArgsError::ZeroScans => Self::Generic(s),
            ObservationArgsError::NoBandwidth
            | ObservationArgsError::NoChanWidth
            | ObservationArgsError::ParseBandwidth(_)
            | ObservationArgsError::ParseChanWidth(_)
            | ObservationArgsError::Invalid(_) => Self::Bandwidth(s),
        }
    }
}

impl From<UnitParseError> for SpwPartitionError {
    fn from(e: UnitParseError) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for SpwPartitionError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
