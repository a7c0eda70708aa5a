// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod pipeline;
mod plan;

use std::{process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn spw_partition() -> Command {
    Command::cargo_bin("spw-partition").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

#[test]
fn test_no_subcommand_prints_help() {
    let cmd = spw_partition().ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("USAGE"), "{stderr}");
}

#[test]
fn test_imaging_params() {
    let cmd = spw_partition()
        .args(["imaging-params", "--bandwidth", "856MHz"])
        .ok();
    assert!(cmd.is_ok(), "imaging-params failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Taylor terms: 2"), "{stdout}");
    assert!(stdout.contains("Deconvolver: mtmfs"), "{stdout}");
}
