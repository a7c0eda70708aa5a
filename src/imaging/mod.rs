// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Imaging parameters that depend on the observed bandwidth.
//!
//! The number of Taylor terms, the deconvolver and the name of the image
//! product all hang off the same bandwidth threshold, so they are only ever
//! derived together here. [`ImagingTaskArgs`] then collects everything the
//! imager and the FITS export need for one field.


use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{
    constants::{
        CALIBRATOR_IMSIZE, DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ, IMAGE_CELL, IMAGE_NITER,
        TARGET_IMSIZE,
    },
    filenames::ImageNames,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Deconvolver {
    /// Single-scale CLEAN.
    #[strum(serialize = "clark")]
    #[serde(rename = "clark")]
    SingleScale,

    /// Multi-term (Taylor-polynomial) multi-frequency synthesis.
    #[strum(serialize = "mtmfs")]
    #[serde(rename = "mtmfs")]
    MultiTermMultiFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImagingParams {
    pub num_taylor_terms: u8,

    pub deconvolver: Deconvolver,

    /// Appended to the restored-image product name, e.g. ".tt0" to select the
    /// zeroth Taylor term. Empty when only one term is used.
    pub image_suffix: &'static str,
}

impl ImagingParams {
    /// The name of the restored image product for an image base name.
    pub fn image_product(&self, image_base: &str) -> String {
        format!("{image_base}.image{}", self.image_suffix)
    }
}

/// Derive imaging parameters with the default threshold of
/// [`DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ`].
pub fn derive_imaging_params(observed_bandwidth_mhz: f64) -> ImagingParams {
    derive_imaging_params_with_threshold(observed_bandwidth_mhz, DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ)
}

/// Bandwidths below `threshold_mhz` get a single Taylor term; anything else
/// (the threshold itself included) gets two.
pub fn derive_imaging_params_with_threshold(
    observed_bandwidth_mhz: f64,
    threshold_mhz: f64,
) -> ImagingParams {
    if observed_bandwidth_mhz < threshold_mhz {
        ImagingParams {
            num_taylor_terms: 1,
            deconvolver: Deconvolver::SingleScale,
            image_suffix: "",
        }
    } else {
        ImagingParams {
            num_taylor_terms: 2,
            deconvolver: Deconvolver::MultiTermMultiFrequency,
            image_suffix: ".tt0",
        }
    }
}

/// What a field is observed for. Calibrators are imaged smaller than targets,
/// and after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRole {
    #[strum(serialize = "target")]
    Target,

    #[strum(serialize = "calibrator")]
    Calibrator,
}

impl FieldRole {
    /// The side length of this field's (square) image \[pixels\].
    pub fn imsize(self) -> u32 {
        match self {
            FieldRole::Target => TARGET_IMSIZE,
            FieldRole::Calibrator => CALIBRATOR_IMSIZE,
        }
    }
}

/// Arguments for imaging one split field and exporting the restored image to
/// FITS.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagingTaskArgs {
    /// The split visibilities of the field.
    pub vis: PathBuf,

    /// `images.base` is the imager's image name; `images.image` is exported to
    /// `images.fits`.
    pub images: ImageNames,

    pub data_column: &'static str,

    /// \[pixels\]
    pub imsize: [u32; 2],

    pub cell: &'static str,

    /// Clean down to this flux density \[Jy\].
    pub threshold: f64,

    pub niter: u32,

    pub weighting: &'static str,

    pub robust: f64,

    pub spec_mode: &'static str,

    pub deconvolver: Deconvolver,

    pub nterms: u8,

    pub save_model: &'static str,

    pub gridder: &'static str,

    pub restoration: bool,

    pub pb_limit: f64,

    pub parallel: bool,
}

impl ImagingTaskArgs {
    pub fn new(
        vis: &Path,
        images: ImageNames,
        role: FieldRole,
        imaging: &ImagingParams,
        parallel: bool,
    ) -> ImagingTaskArgs {
        let imsize = role.imsize();
        ImagingTaskArgs {
            vis: vis.to_path_buf(),
            images,
            data_column: "corrected",
            imsize: [imsize, imsize],
            cell: IMAGE_CELL,
            threshold: 0.0,
            niter: IMAGE_NITER,
            weighting: "briggs",
            robust: 0.0,
            spec_mode: "mfs",
            deconvolver: imaging.deconvolver,
            nterms: imaging.num_taylor_terms,
            save_model: "none",
            gridder: "standard",
            restoration: true,
            pb_limit: 0.0,
            parallel,
        }
    }
}
