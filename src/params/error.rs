// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::{averaging::AveragingError, partition::InvalidBandwidthError, spw::SelectionFormatError};

#[derive(Error, Debug)]
pub enum PipelineParamsError {
    #[error(transparent)]
    Selection(#[from] SelectionFormatError),

    #[error(transparent)]
    Bandwidth(#[from] InvalidBandwidthError),

    #[error(transparent)]
    Averaging(#[from] AveragingError),
}
