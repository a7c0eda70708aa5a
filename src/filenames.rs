// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Names of the data products handed to (and expected back from) the external
//! partition, split and imaging tasks.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::imaging::ImagingParams;

/// The file stem of a visibility path, i.e. the file name without its
/// extension (whatever its case) or parent directories.
pub fn vis_stem(vis: &Path) -> String {
    vis.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The multi-MS written by partitioning, e.g. "/data/obs.ms" becomes
/// "obs.mms" (in the current directory).
pub fn partitioned_vis_name(vis: &Path) -> PathBuf {
    PathBuf::from(format!("{}.mms", vis_stem(vis)))
}

/// The visibilities of a single field split out of `vis`, e.g. "/data/obs.mms"
/// and "J1939-6342" become "/data/obs.J1939-6342.mms". The output sits next to
/// the input.
pub fn split_vis_name(vis: &Path, field: &str, keep_mms: bool) -> PathBuf {
    let ext = if keep_mms { "mms" } else { "ms" };
    vis.with_file_name(format!("{}.{field}.{ext}", vis_stem(vis)))
}

/// The names of the image products for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageNames {
    /// The image base name handed to the imager, e.g. "images/obs_J1939.im".
    pub base: PathBuf,

    /// The restored image to be exported, e.g. "images/obs_J1939.im.image.tt0".
    pub image: PathBuf,

    /// The exported FITS image, e.g. "images/obs_J1939.im.fits".
    pub fits: PathBuf,
}

impl ImageNames {
    pub fn new(images_dir: &Path, vis: &Path, field: &str, imaging: &ImagingParams) -> ImageNames {
        let base = format!("{}_{field}.im", vis_stem(vis));
        ImageNames {
            image: images_dir.join(imaging.image_product(&base)),
            fits: images_dir.join(format!("{base}.fits")),
            base: images_dir.join(base),
        }
    }
}
