// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Spectral-window partition planning for radio-interferometer calibration
pipelines.

Given an SPW selection and a little observation metadata, work out how many
sub-bands the selected band should be partitioned into, how many channels go
into each, and the split and imaging parameters that follow from it.
 */

pub mod averaging;
pub mod bandwidth;
mod cli;
pub mod constants;
pub mod filenames;
pub mod imaging;
pub mod params;
pub mod partition;
pub mod spw;
pub mod unit_parsing;

// Re-exports.
pub use bandwidth::effective_bandwidth;
pub use cli::{SpwPartition, SpwPartitionError};
pub use imaging::{derive_imaging_params, Deconvolver, ImagingParams};
pub use params::{ObservationMetadata, PipelineConfig, PipelineParams};
pub use partition::{plan, PartitionPlan};
pub use spw::{parse_spw_selection, SpwSelection};
