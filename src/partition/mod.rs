// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Work out how to split an observation's band into sub-bands, such that no
//! sub-band has a fractional bandwidth larger than some maximum.

mod error;

pub use error::InvalidBandwidthError;

use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::{filenames::partitioned_vis_name, params::ObservationMetadata};

/// How the band is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionPlan {
    /// The number of sub-bands. Always at least 1.
    pub num_sub_bands: usize,

    /// The number of channels in each sub-band. Always at least 1.
    pub chans_per_sub_band: usize,
}

/// Plan a partition of the effective bandwidth.
///
/// The maximum bandwidth of a sub-band is `max_frac_bw * effective_bandwidth_hz`;
/// the number of channels per sub-band and the number of sub-bands are the
/// nearest integers (ties to even) to the corresponding ratios, clamped to be
/// at least 1.
pub fn plan(
    effective_bandwidth_hz: f64,
    chan_width_hz: f64,
    max_frac_bw: f64,
) -> Result<PartitionPlan, InvalidBandwidthError> {
    // These comparisons are written so that NaNs are rejected too.
    if !(effective_bandwidth_hz > 0.0 && effective_bandwidth_hz.is_finite()) {
        return Err(InvalidBandwidthError::Bandwidth(effective_bandwidth_hz));
    }
    if !(chan_width_hz > 0.0 && chan_width_hz.is_finite()) {
        return Err(InvalidBandwidthError::ChanWidth(chan_width_hz));
    }
    if !(max_frac_bw > 0.0 && max_frac_bw <= 1.0) {
        return Err(InvalidBandwidthError::FractionalBandwidth(max_frac_bw));
    }

    let max_sub_band_bw = max_frac_bw * effective_bandwidth_hz;
    let chans_per_sub_band = nearest_count(max_sub_band_bw / chan_width_hz);
    let num_sub_bands = nearest_count(effective_bandwidth_hz / max_sub_band_bw);
    debug!(
        "Max. sub-band bandwidth: {max_sub_band_bw} Hz; {num_sub_bands} sub-bands of {chans_per_sub_band} channels"
    );

    Ok(PartitionPlan {
        num_sub_bands,
        chans_per_sub_band,
    })
}

/// Round half to even, never returning less than 1.
fn nearest_count(ratio: f64) -> usize {
    (ratio.round_ties_even() as usize).max(1)
}

/// Everything the external partitioning task needs to turn an MS into a
/// multi-MS with the planned sub-bands. The sub-MSs are separated by scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionTaskArgs {
    pub vis: PathBuf,

    pub output_vis: PathBuf,

    /// The SPW selection, verbatim.
    pub spw: String,

    pub create_mms: bool,

    pub separation_axis: &'static str,

    /// One sub-MS per scan.
    pub num_sub_ms: usize,

    pub data_column: &'static str,

    pub regrid: bool,

    /// The regridding width in channels.
    pub width: usize,

    /// The number of output SPWs.
    pub nspw: usize,
}

impl PartitionTaskArgs {
    pub fn new(
        vis: &Path,
        spw: &str,
        plan: &PartitionPlan,
        metadata: &ObservationMetadata,
    ) -> PartitionTaskArgs {
        PartitionTaskArgs {
            vis: vis.to_path_buf(),
            output_vis: partitioned_vis_name(vis),
            spw: spw.to_string(),
            create_mms: true,
            separation_axis: "scan",
            num_sub_ms: metadata.num_scans.max(1),
            data_column: "DATA",
            regrid: true,
            width: plan.chans_per_sub_band,
            nspw: plan.num_sub_bands,
        }
    }
}
