// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, write_to_file, InfoPrinter, PartitionArgs, Warn, ARG_FILE_HELP,
    OUTPUT_HELP,
};
use crate::{
    constants::{DEFAULT_IMAGES_DIR, DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ},
    params::{PipelineConfig, PipelineParams},
    SpwPartitionError,
};

lazy_static::lazy_static! {
    static ref TAYLOR_THRESHOLD_HELP: String =
        format!("Observed bandwidths at or above this many MHz are imaged with two Taylor terms. Default: {DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ}");

    static ref IMAGES_DIR_HELP: String =
        format!("The directory that images are written to. Default: {DEFAULT_IMAGES_DIR}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PipelineArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) partition_args: PartitionArgs,

    /// When splitting, average this many channels together. Also supports a
    /// target frequency resolution (e.g. 835.9375kHz), which must be a
    /// multiple of the channel width. Default: 1 (no averaging)
    #[clap(long, help_heading = "SPLITTING")]
    pub(super) spec_avg: Option<String>,

    /// When splitting, average visibilities into time bins of this size (e.g.
    /// 8s). A value without a unit is in seconds. Default: 8s
    #[clap(long, help_heading = "SPLITTING")]
    pub(super) time_avg: Option<String>,

    /// Split each field into a multi-MS and image in parallel. Without this,
    /// each field is split into a plain MS.
    #[clap(long, help_heading = "SPLITTING")]
    #[serde(default)]
    pub(super) keep_mms: bool,

    /// The target fields to split out and image.
    #[clap(short, long = "field", multiple_values(true), help_heading = "SPLITTING")]
    pub(super) fields: Option<Vec<String>>,

    /// The calibrator fields to split out and image. These are imaged after
    /// the targets, and at a smaller size.
    #[clap(long = "calibrator", multiple_values(true), help_heading = "SPLITTING")]
    pub(super) calibrators: Option<Vec<String>>,

    #[clap(long, help = TAYLOR_THRESHOLD_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) taylor_threshold: Option<f64>,

    #[clap(long, help = IMAGES_DIR_HELP.as_str(), help_heading = "IMAGING")]
    pub(super) images_dir: Option<PathBuf>,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl PipelineArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<PipelineArgs, SpwPartitionError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PipelineArgs {
                args_file: _,
                partition_args,
                spec_avg,
                time_avg,
                keep_mms,
                fields,
                calibrators,
                taylor_threshold,
                images_dir,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(PipelineArgs {
                args_file: None,
                partition_args: cli_args.partition_args.merge(partition_args),
                spec_avg: cli_args.spec_avg.or(spec_avg),
                time_avg: cli_args.time_avg.or(time_avg),
                keep_mms: cli_args.keep_mms || keep_mms,
                fields: cli_args.fields.or(fields),
                calibrators: cli_args.calibrators.or(calibrators),
                taylor_threshold: cli_args.taylor_threshold.or(taylor_threshold),
                images_dir: cli_args.images_dir.or(images_dir),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(PipelineParams, Option<PathBuf>), SpwPartitionError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            partition_args,
            spec_avg,
            time_avg,
            keep_mms,
            fields,
            calibrators,
            taylor_threshold,
            images_dir,
            output,
        } = self;

        // Parsing the partition arguments reports on the partitioning and
        // checks everything about the observation.
        let (partition, metadata) = partition_args.parse()?;
        let fields = fields.unwrap_or_default();
        let calibrator_fields = calibrators.unwrap_or_default();
        if fields.is_empty() && calibrator_fields.is_empty() {
            "No fields were specified; nothing will be split or imaged".warn();
        }

        let config = PipelineConfig {
            vis: partition.task.vis.clone(),
            spw: partition.task.spw.clone(),
            max_frac_bw: partition.max_frac_bw,
            taylor_threshold_mhz: taylor_threshold.unwrap_or(DEFAULT_TAYLOR_TERM_THRESHOLD_MHZ),
            spec_avg,
            time_avg,
            keep_mms,
            fields,
            calibrator_fields,
            images_dir: images_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR)),
        };
        let params = PipelineParams::new(&config, &metadata)?;

        let mut printer = InfoPrinter::new("Splitting and imaging".into());
        let averaging = &params.averaging;
        printer.push_block(vec![
            if averaging.chan_average {
                format!("Averaging {} channels together", averaging.chan_bin).into()
            } else {
                "No channel averaging".into()
            },
            format!("Time bin: {}", averaging.time_bin()).into(),
            if params.keep_mms {
                "Fields are kept as multi-MSs and imaged in parallel".into()
            } else {
                "Fields are split into plain MSs".into()
            },
        ]);
        printer.push_line(
            format!(
                "{} Taylor term(s) with the {} deconvolver",
                params.imaging.num_taylor_terms, params.imaging.deconvolver
            )
            .into(),
        );
        for field in &params.fields {
            let imsize = field.imaging.imsize;
            printer.push_block(vec![
                format!(
                    "{} ({}): {}",
                    field.field,
                    field.role,
                    field.split.output_vis.display()
                )
                .into(),
                format!(
                    "image ({}x{}): {}",
                    imsize[0],
                    imsize[1],
                    field.imaging.images.image.display()
                )
                .into(),
                format!("FITS: {}", field.imaging.images.fits.display()).into(),
            ]);
        }
        printer.display();
        display_warnings();

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
