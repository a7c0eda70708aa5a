// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{write_to_file, InfoPrinter, ARG_FILE_HELP, OUTPUT_HELP};
use crate::{
    constants::DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ,
    imaging::{derive_imaging_params_with_threshold, ImagingParams},
    partition::InvalidBandwidthError,
    unit_parsing::parse_freq_hz,
    SpwPartitionError,
};

lazy_static::lazy_static! {
    static ref TAYLOR_THRESHOLD_HELP: String =
        format!("Observed bandwidths at or above this many MHz are imaged with two Taylor terms. Default: {DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ImagingParamsArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The total observed bandwidth. A unit may be attached (e.g. 856MHz);
    /// otherwise, the value is in Hz.
    #[clap(short, long)]
    pub(super) bandwidth: Option<String>,

    #[clap(long, help = TAYLOR_THRESHOLD_HELP.as_str())]
    pub(super) taylor_threshold: Option<f64>,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl ImagingParamsArgs {
    pub(super) fn merge(self) -> Result<ImagingParamsArgs, SpwPartitionError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ImagingParamsArgs {
                args_file: _,
                bandwidth,
                taylor_threshold,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(ImagingParamsArgs {
                args_file: None,
                bandwidth: cli_args.bandwidth.or(bandwidth),
                taylor_threshold: cli_args.taylor_threshold.or(taylor_threshold),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(ImagingParams, Option<PathBuf>), SpwPartitionError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            bandwidth,
            taylor_threshold,
            output,
        } = self;

        let bandwidth_hz = match bandwidth {
            Some(b) => parse_freq_hz(&b)?,
            None => {
                return Err(SpwPartitionError::Bandwidth(
                    "The observed bandwidth wasn't specified".to_string(),
                ))
            }
        };
        if !(bandwidth_hz > 0.0 && bandwidth_hz.is_finite()) {
            return Err(InvalidBandwidthError::ObservedBandwidth(bandwidth_hz).into());
        }
        let bandwidth_mhz = bandwidth_hz / 1e6;
        let threshold = taylor_threshold.unwrap_or(DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ);
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(SpwPartitionError::Bandwidth(format!(
                "The Taylor-term threshold must be positive and finite, but got {threshold} MHz"
            )));
        }
        let params = derive_imaging_params_with_threshold(bandwidth_mhz, threshold);

        let mut printer = InfoPrinter::new(format!("Imaging {bandwidth_mhz} MHz").into());
        printer.push_line(format!("Taylor-term threshold: {threshold} MHz").into());
        printer.push_block(vec![
            format!("Taylor terms: {}", params.num_taylor_terms).into(),
            format!("Deconvolver: {}", params.deconvolver).into(),
            format!("Restored image: <name>{}", params.image_product("")).into(),
        ]);
        printer.display();

        Ok((params, output))
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), SpwPartitionError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let (params, output) = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        if let Some(output) = output {
            write_to_file(&params, &output)?;
        }
        Ok(())
    }
}
