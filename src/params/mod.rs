// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parameters that are ready to be handed to the external partition, split and
//! imaging tasks.
//!
//! The code here is kind of "mirroring" the code within the `cli` module; the
//! idea is that `cli` is unparsed, user-facing code, whereas parameters have
//! been parsed and are ready to be used directly.

mod error;

pub use error::PipelineParamsError;

use std::path::{Path, PathBuf};

use itertools::Itertools;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    averaging::{SplitAveraging, SplitTaskArgs},
    constants::{DEFAULT_IMAGES_DIR, DEFAULT_MAX_FRACTIONAL_BANDWIDTH, DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ},
    filenames::ImageNames,
    imaging::{derive_imaging_params_with_threshold, FieldRole, ImagingParams, ImagingTaskArgs},
    partition::{plan, InvalidBandwidthError, PartitionPlan, PartitionTaskArgs},
    spw::{parse_spw_selection, SpwSelection},
};

/// What we need to know about an observation. These values come from a
/// metadata query of the measurement set; nothing here reads the data itself.
///
/// The channel width is assumed to be the same across the whole observation;
/// it should be the width of SPW 0's first channel. Multi-SPW observations with
/// different channel widths break this assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationMetadata {
    /// The total observed bandwidth \[Hz\].
    pub bandwidth_hz: f64,

    /// \[Hz\]
    pub chan_width_hz: f64,

    pub num_scans: usize,
}

impl ObservationMetadata {
    /// Metadata with a positive, finite observed bandwidth and channel width.
    /// A scan count of 0 is taken to be 1.
    pub fn new(
        bandwidth_hz: f64,
        chan_width_hz: f64,
        num_scans: usize,
    ) -> Result<ObservationMetadata, InvalidBandwidthError> {
        let metadata = ObservationMetadata {
            bandwidth_hz,
            chan_width_hz,
            num_scans: num_scans.max(1),
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Check that the observed bandwidth and channel width are positive and
    /// finite.
    pub fn validate(&self) -> Result<(), InvalidBandwidthError> {
        // These comparisons are written so that NaNs are rejected too.
        if !(self.bandwidth_hz > 0.0 && self.bandwidth_hz.is_finite()) {
            return Err(InvalidBandwidthError::ObservedBandwidth(self.bandwidth_hz));
        }
        if !(self.chan_width_hz > 0.0 && self.chan_width_hz.is_finite()) {
            return Err(InvalidBandwidthError::ChanWidth(self.chan_width_hz));
        }
        Ok(())
    }

    pub fn bandwidth_mhz(&self) -> f64 {
        self.bandwidth_hz / 1e6
    }
}

/// A planned partition of an observation's band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionParams {
    pub selection: SpwSelection,

    /// \[Hz\]
    pub effective_bandwidth_hz: f64,

    pub max_frac_bw: f64,

    pub plan: PartitionPlan,

    pub task: PartitionTaskArgs,
}

impl PartitionParams {
    pub fn new(
        vis: &Path,
        spw: &str,
        metadata: &ObservationMetadata,
        max_frac_bw: f64,
    ) -> Result<PartitionParams, PipelineParamsError> {
        metadata.validate()?;
        let selection = parse_spw_selection(spw)?;
        let effective_bandwidth_hz =
            selection.effective_bandwidth(metadata.chan_width_hz, metadata.bandwidth_hz);
        debug!("Effective bandwidth of '{selection}': {effective_bandwidth_hz} Hz");
        let plan = plan(effective_bandwidth_hz, metadata.chan_width_hz, max_frac_bw)?;
        let task = PartitionTaskArgs::new(vis, spw, &plan, metadata);

        Ok(PartitionParams {
            selection,
            effective_bandwidth_hz,
            max_frac_bw,
            plan,
            task,
        })
    }
}

/// How a single field is split and imaged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldProducts {
    pub field: String,

    pub role: FieldRole,

    pub split: SplitTaskArgs,

    pub imaging: ImagingTaskArgs,
}

impl FieldProducts {
    fn new(
        field: &str,
        role: FieldRole,
        partition: &PartitionTaskArgs,
        averaging: &SplitAveraging,
        imaging: &ImagingParams,
        config: &PipelineConfig,
    ) -> FieldProducts {
        // Splitting and imaging work on the partitioned data.
        let partitioned = &partition.output_vis;
        let split = SplitTaskArgs::new(
            partitioned,
            field,
            &partition.spw,
            averaging,
            config.keep_mms,
        );
        let images = ImageNames::new(&config.images_dir, partitioned, field, imaging);
        let imaging =
            ImagingTaskArgs::new(&split.output_vis, images, role, imaging, config.keep_mms);
        FieldProducts {
            field: field.to_string(),
            role,
            split,
            imaging,
        }
    }
}

/// Everything the pipeline needs, before any user input has been validated.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub vis: PathBuf,
    pub spw: String,
    pub max_frac_bw: f64,
    pub taylor_threshold_mhz: f64,
    pub spec_avg: Option<String>,
    pub time_avg: Option<String>,
    pub keep_mms: bool,
    /// Target fields, imaged at full size.
    pub fields: Vec<String>,
    pub calibrator_fields: Vec<String>,
    pub images_dir: PathBuf,
}

impl PipelineConfig {
    /// A config with default values for everything but the input visibilities.
    pub fn new(vis: PathBuf) -> PipelineConfig {
        PipelineConfig {
            vis,
            spw: String::new(),
            max_frac_bw: DEFAULT_MAX_FRACTIONAL_BANDWIDTH,
            taylor_threshold_mhz: DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ,
            spec_avg: None,
            time_avg: None,
            keep_mms: false,
            fields: vec![],
            calibrator_fields: vec![],
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }
}

/// All parameters derived for one observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineParams {
    pub partition: PartitionParams,

    pub averaging: SplitAveraging,

    pub keep_mms: bool,

    pub imaging: ImagingParams,

    /// Image in parallel only if the data are kept as a multi-MS.
    pub parallel_imaging: bool,

    /// Targets first, then calibrators; this is the imaging order.
    pub fields: Vec<FieldProducts>,
}

impl PipelineParams {
    pub fn new(
        config: &PipelineConfig,
        metadata: &ObservationMetadata,
    ) -> Result<PipelineParams, PipelineParamsError> {
        let partition =
            PartitionParams::new(&config.vis, &config.spw, metadata, config.max_frac_bw)?;
        let averaging = SplitAveraging::new(
            Some(metadata.chan_width_hz),
            config.spec_avg.as_deref(),
            config.time_avg.as_deref(),
        )?;
        let imaging = derive_imaging_params_with_threshold(
            metadata.bandwidth_mhz(),
            config.taylor_threshold_mhz,
        );

        let targets = config.fields.iter().map(|f| (f, FieldRole::Target));
        let calibrators = config
            .calibrator_fields
            .iter()
            .map(|f| (f, FieldRole::Calibrator));
        let fields = targets
            .chain(calibrators)
            .unique_by(|(f, _)| *f)
            .map(|(field, role)| {
                FieldProducts::new(field, role, &partition.task, &averaging, &imaging, config)
            })
            .collect_vec();
        debug!("Splitting and imaging {} field(s)", fields.len());

        Ok(PipelineParams {
            partition,
            averaging,
            keep_mms: config.keep_mms,
            imaging,
            parallel_imaging: config.keep_mms,
            fields,
        })
    }
}
