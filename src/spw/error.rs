// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Malformed SPW selection syntax. These are configuration mistakes; they are
/// never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionFormatError {
    #[error("SPW selection clause '{clause}' is empty")]
    EmptyClause { clause: String },

    #[error("Unrecognised frequency unit '{unit}' in SPW selection clause '{clause}'; supported units are Hz, kHz, MHz and GHz")]
    UnknownUnit { clause: String, unit: String },

    #[error("Could not parse '{token}' in SPW selection clause '{clause}' as a number")]
    BadNumber { clause: String, token: String },

    #[error("SPW selection range '{range}' in clause '{clause}' has more than one '~'")]
    TooManySeparators { clause: String, range: String },

    #[error("The unit of '{token}' doesn't match the rest of SPW selection clause '{clause}'")]
    MixedUnits { clause: String, token: String },
}
