// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidBandwidthError {
    #[error("The observed bandwidth must be positive and finite, but got {0} Hz")]
    ObservedBandwidth(f64),

    #[error("The effective bandwidth must be positive and finite, but got {0} Hz")]
    Bandwidth(f64),

    #[error("The channel width must be positive and finite, but got {0} Hz")]
    ChanWidth(f64),

    #[error("The maximum fractional bandwidth must be in (0, 1], but got {0}")]
    FractionalBandwidth(f64),
}
