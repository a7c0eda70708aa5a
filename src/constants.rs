// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

Floating-point constants *must* be double precision.
 */

/// The largest fraction of the effective bandwidth that a single sub-band may
/// span.
pub const DEFAULT_MAX_FRACTIONAL_BANDWIDTH: f64 = 0.1;

/// Observed bandwidths at or above this get two Taylor terms when imaging
/// \[MHz\].
pub const DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ: f64 = 100.0;

/// The default number of channels to average together when splitting.
pub const DEFAULT_SPEC_AVG: usize = 1;

/// The default time bin when splitting.
pub const DEFAULT_TIME_AVG: &str = "8s";

/// Where images are written if no other directory is given.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// The side length of target-field images \[pixels\].
pub const TARGET_IMSIZE: u32 = 2048;

/// The side length of calibrator-field images \[pixels\].
pub const CALIBRATOR_IMSIZE: u32 = 512;

/// The image cell size handed to the imager.
pub const IMAGE_CELL: &str = "2arcsec";

/// The number of minor-cycle iterations for each image.
pub const IMAGE_NITER: u32 = 1000;
