// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, spw_partition};

#[test]
fn test_plan_whole_band() {
    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "plan",
            "--vis", "obs.ms",
            "--bandwidth", "1GHz",
            "--chan-width", "1MHz",
        ])
        .ok();
    assert!(cmd.is_ok(), "plan failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("nspw = 10, width = 100"), "{stdout}");
    // The number of scans wasn't given.
    assert!(stdout.contains("assuming 1"), "{stdout}");
}

#[test]
fn test_plan_bad_selection() {
    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "plan",
            "--vis", "obs.ms",
            "--bandwidth", "856MHz",
            "--chan-width", "208.984375kHz",
            "--spw", "100~200XHz",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("XHz"), "{stderr}");
}

#[test]
fn test_plan_zero_bandwidth_with_a_range_selection() {
    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "plan",
            "--vis", "obs.ms",
            "--bandwidth", "0",
            "--chan-width", "208.984375kHz",
            "--spw", "100~200",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("observed bandwidth"), "{stderr}");
}

#[test]
fn test_imaging_params_nan_bandwidth() {
    let cmd = spw_partition()
        .args(["imaging-params", "-b", "nan"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
}

#[test]
fn test_plan_arg_file_and_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&args_file).unwrap();
    f.write_all(
        indoc! {r#"
            vis = "/data/obs.ms"
            bandwidth = "856MHz"
            chan_width = "208.984375kHz"
            num_scans = 12
            spw = "0:880~933MHz;960~1010MHz,0:1100~1300MHz"
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);
    let output = tmp_dir.path().join("plan.json");

    let cmd = spw_partition()
        .args([
            "plan",
            &format!("{}", args_file.display()),
            "--output",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "plan failed: {}", cmd.err().unwrap());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["plan"]["num_sub_bands"], 10);
    assert_eq!(json["plan"]["chans_per_sub_band"], 145);
    assert_eq!(json["task"]["num_sub_ms"], 12);
    assert_eq!(json["task"]["separation_axis"], "scan");
    assert_eq!(json["task"]["data_column"], "DATA");
    assert_eq!(
        json["task"]["spw"],
        "0:880~933MHz;960~1010MHz,0:1100~1300MHz"
    );
}

#[test]
fn test_save_toml_reproduces_the_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "plan",
            "--vis", "obs.ms",
            "--bandwidth", "1e9",
            "--chan-width", "1e6",
            "--max-frac-bw", "0.5",
            "--save-toml", &format!("{}", saved.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "plan failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(saved.exists());

    let cmd = spw_partition()
        .args(["plan", &format!("{}", saved.display())])
        .ok();
    assert!(cmd.is_ok(), "plan failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("nspw = 2, width = 500"), "{stdout}");
}
