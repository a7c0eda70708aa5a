// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Here, we abstract many aspects
//! of `spw-partition`, e.g. the `plan` and `pipeline` subcommands both need to
//! know about the observation, so the same observation arguments are shared
//! between them.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::{fs::File, io::Write, path::Path, path::PathBuf, str::FromStr};

use clap::Parser;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use super::SpwPartitionError;
use crate::{
    constants::DEFAULT_MAX_FRACTIONAL_BANDWIDTH,
    params::{ObservationMetadata, PartitionParams},
    partition::InvalidBandwidthError,
    spw::SpwSelection,
    unit_parsing::{parse_freq_hz, UnitParseError},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref OUTPUT_HELP: String =
        format!("Write the derived parameters to this file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref MAX_FRAC_BW_HELP: String =
        format!("The largest fraction of the effective bandwidth that one sub-band may span. Must be in (0, 1]. Default: {DEFAULT_MAX_FRACTIONAL_BANDWIDTH}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

impl ArgFileTypes {
    pub(super) fn from_path(path: &Path) -> Option<ArgFileTypes> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok())
    }
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        match ArgFileTypes::from_path(&$arg_file) {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SpwPartitionError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(SpwPartitionError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(SpwPartitionError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Serialise something (e.g. derived parameters) to a toml or json file,
/// depending on the file's extension.
pub(super) fn write_to_file<T: Serialize>(
    thing: &T,
    path: &Path,
) -> Result<(), SpwPartitionError> {
    let contents = match ArgFileTypes::from_path(path) {
        Some(ArgFileTypes::Toml) => toml::to_string(thing).map_err(|e| {
            SpwPartitionError::Generic(format!("Couldn't serialise to toml: {e}"))
        })?,
        Some(ArgFileTypes::Json) => serde_json::to_string_pretty(thing).map_err(|e| {
            SpwPartitionError::Generic(format!("Couldn't serialise to json: {e}"))
        })?,
        None => {
            return Err(SpwPartitionError::ArgFile(format!(
                "Output file '{}' doesn't have a recognised file extension! Valid extensions are: {}",
                path.display(),
                *ARG_FILE_TYPES_COMMA_SEPARATED
            )))
        }
    };
    let mut f = File::create(path)?;
    f.write_all(contents.as_bytes())?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Values that would normally come from a metadata query of the input
/// measurement set.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ObservationArgs {
    /// The total observed bandwidth. A unit may be attached (e.g. 856MHz);
    /// otherwise, the value is in Hz.
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) bandwidth: Option<String>,

    /// The width of a single channel. A unit may be attached (e.g.
    /// 208.984375kHz); otherwise, the value is in Hz. This is assumed to be the
    /// same for all channels in the observation.
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) chan_width: Option<String>,

    /// The number of scans in the observation. Partitioning makes one sub-MS
    /// per scan. Default: 1
    #[clap(long, help_heading = "OBSERVATION")]
    pub(super) num_scans: Option<usize>,
}

impl ObservationArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            bandwidth: self.bandwidth.or(other.bandwidth),
            chan_width: self.chan_width.or(other.chan_width),
            num_scans: self.num_scans.or(other.num_scans),
        }
    }

    pub(super) fn parse(self) -> Result<ObservationMetadata, ObservationArgsError> {
        let Self {
            bandwidth,
            chan_width,
            num_scans,
        } = self;

        let bandwidth_hz = parse_freq_hz(&bandwidth.ok_or(ObservationArgsError::NoBandwidth)?)
            .map_err(ObservationArgsError::ParseBandwidth)?;
        let chan_width_hz = parse_freq_hz(&chan_width.ok_or(ObservationArgsError::NoChanWidth)?)
            .map_err(ObservationArgsError::ParseChanWidth)?;
        let num_scans = match num_scans {
            Some(0) => return Err(ObservationArgsError::ZeroScans),
            Some(n) => n,
            None => {
                "The number of scans wasn't specified; assuming 1".warn();
                1
            }
        };

        Ok(ObservationMetadata::new(bandwidth_hz, chan_width_hz, num_scans)?)
    }
}

/// Arguments shared by everything that needs to partition an observation.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PartitionArgs {
    /// Path to the input measurement set.
    #[clap(long, help_heading = "INPUT DATA")]
    pub(super) vis: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) obs_args: ObservationArgs,

    /// The SPW selection, e.g. "0:880~933MHz;960~1010MHz,0:1100~1300MHz" or
    /// "100~200". Clauses without a frequency unit select channels. If this
    /// isn't given, the whole band is used.
    #[clap(short, long, help_heading = "PARTITIONING")]
    pub(super) spw: Option<String>,

    #[clap(long, help = MAX_FRAC_BW_HELP.as_str(), help_heading = "PARTITIONING")]
    pub(super) max_frac_bw: Option<f64>,
}

impl PartitionArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            vis: self.vis.or(other.vis),
            obs_args: self.obs_args.merge(other.obs_args),
            spw: self.spw.or(other.spw),
            max_frac_bw: self.max_frac_bw.or(other.max_frac_bw),
        }
    }

    /// Parse the arguments into partitioning parameters, printing out what the
    /// partitioning will look like.
    pub(super) fn parse(self) -> Result<(PartitionParams, ObservationMetadata), SpwPartitionError> {
        let Self {
            vis,
            obs_args,
            spw,
            max_frac_bw,
        } = self;

        let vis = vis.ok_or(ObservationArgsError::NoVis)?;
        let metadata = obs_args.parse()?;
        let spw = spw.unwrap_or_default();
        let max_frac_bw = max_frac_bw.unwrap_or(DEFAULT_MAX_FRACTIONAL_BANDWIDTH);
        let params = PartitionParams::new(&vis, &spw, &metadata, max_frac_bw)?;

        if let SpwSelection::Ranges(set) = &params.selection {
            let num_points = set.num_freq_points();
            if num_points > 0 {
                format!("{num_points} single-frequency selection(s) were each counted as one channel width").warn();
            }
        }

        let mut printer = InfoPrinter::new(format!("Partitioning {}", vis.display()).into());
        printer.push_block(vec![
            format!(
                "Observed bandwidth: {} MHz, channel width: {} kHz",
                metadata.bandwidth_mhz(),
                metadata.chan_width_hz / 1e3
            )
            .into(),
            "Channel widths are assumed to be the same for the whole observation".into(),
        ]);
        printer.push_block(vec![
            format!("SPW selection: {}", params.selection).into(),
            format!(
                "Effective bandwidth: {} MHz",
                params.effective_bandwidth_hz / 1e6
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!(
                "{} sub-bands of {} channels (max. fractional bandwidth {})",
                params.plan.num_sub_bands, params.plan.chans_per_sub_band, params.max_frac_bw
            )
            .into(),
            format!(
                "{} sub-MSs separated by scan, written to {}",
                params.task.num_sub_ms,
                params.task.output_vis.display()
            )
            .into(),
        ]);
        printer.display();

        Ok((params, metadata))
    }
}

#[derive(Error, Debug)]
pub(super) enum ObservationArgsError {
    #[error("No input measurement set was specified")]
    NoVis,

    #[error("The observed bandwidth wasn't specified")]
    NoBandwidth,

    #[error("The channel width wasn't specified")]
    NoChanWidth,

    #[error("Couldn't parse the observed bandwidth: {0}")]
    ParseBandwidth(UnitParseError),

    #[error("Couldn't parse the channel width: {0}")]
    ParseChanWidth(UnitParseError),

    #[error("The number of scans cannot be 0")]
    ZeroScans,

    #[error(transparent)]
    Invalid(#[from] InvalidBandwidthError),
}
