// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Effective bandwidth of an SPW selection.
//!
//! Everything here assumes that the channel width is the same across the whole
//! observation, which only holds for single-SPW data (e.g. MeerKAT). The
//! caller is expected to supply the width of SPW 0's first channel.

#[cfg(test)]
mod tests;

use crate::spw::{FrequencyRange, SelectionSet, SpwSelection};

impl FrequencyRange {
    /// The bandwidth covered by this range \[Hz\].
    ///
    /// A channel range contributes `(upper - lower) * chan_width_hz`, and a
    /// frequency range contributes `upper - lower` in Hz. A single point of
    /// either kind contributes one channel width; for frequency points this is
    /// a policy choice rather than a physical necessity.
    pub fn effective_bandwidth(&self, chan_width_hz: f64) -> f64 {
        match (self.is_single(), self.is_channel_indexed()) {
            (true, _) => chan_width_hz,
            (false, true) => (self.upper - self.lower) * chan_width_hz,
            (false, false) => (self.upper - self.lower) * self.unit.multiplier(),
        }
    }
}

impl SelectionSet {
    /// The sum of the bandwidths of all ranges \[Hz\].
    pub fn effective_bandwidth(&self, chan_width_hz: f64) -> f64 {
        self.iter()
            .map(|range| range.effective_bandwidth(chan_width_hz))
            .sum()
    }

    /// The number of single-frequency points in this set, i.e. the number of
    /// ranges counted as one channel by fallback.
    pub fn num_freq_points(&self) -> usize {
        self.iter()
            .filter(|r| r.is_single() && !r.is_channel_indexed())
            .count()
    }
}

impl SpwSelection {
    /// The effective bandwidth of this selection \[Hz\]. The whole band is
    /// exactly `observed_bandwidth_hz`.
    pub fn effective_bandwidth(&self, chan_width_hz: f64, observed_bandwidth_hz: f64) -> f64 {
        match self {
            SpwSelection::Whole => observed_bandwidth_hz,
            SpwSelection::Ranges(set) => set.effective_bandwidth(chan_width_hz),
        }
    }
}

/// Get the effective bandwidth of a selection \[Hz\]. This is a pure function
/// of its inputs.
pub fn effective_bandwidth(
    selection: &SpwSelection,
    chan_width_hz: f64,
    observed_bandwidth_hz: f64,
) -> f64 {
    selection.effective_bandwidth(chan_width_hz, observed_bandwidth_hz)
}
