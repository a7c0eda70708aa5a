// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AveragingError {
    #[error("The channel average factor was 0; this is not permitted")]
    Zero,

    #[error("The channel average factor has no units and isn't an integer; this is not permitted")]
    NotInteger,

    #[error("The channel average width isn't an integer multiple of the channel width: {out} Hz vs {inp} Hz")]
    NotIntegerMultiple { out: f64, inp: f64 },

    #[error("The time bin must be positive, but got {0} seconds")]
    TimeBinNotPositive(f64),

    #[error(transparent)]
    Parse(#[from] crate::unit_parsing::UnitParseError),
}
