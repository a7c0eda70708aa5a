// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.


use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{write_to_file, PartitionArgs, ARG_FILE_HELP, OUTPUT_HELP};
use crate::{cli::common::display_warnings, params::PartitionParams, SpwPartitionError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PlanArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(flatten)]
    pub(super) partition_args: PartitionArgs,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl PlanArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<PlanArgs, SpwPartitionError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Ensure all of the file args are accounted for by pattern
            // matching.
            let PlanArgs {
                args_file: _,
                partition_args,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(PlanArgs {
                args_file: None,
                partition_args: cli_args.partition_args.merge(partition_args),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<(PartitionParams, Option<PathBuf>), SpwPartitionError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            partition_args,
            output,
        } = self;

        let (params, _) = partition_args.parse()?;
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

        match output {
            Some(output) => write_to_file(&params, &output)?,
            None => info!(
                "nspw = {}, width = {}",
                params.plan.num_sub_bands, params.plan.chans_per_sub_band
            ),
        }
        Ok(())
    }
}
