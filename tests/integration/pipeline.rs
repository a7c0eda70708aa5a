// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{get_cmd_output, spw_partition};

#[test]
fn test_pipeline_json_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pipeline.json");

    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "pipeline",
            "--vis", "/data/obs.ms",
            "--bandwidth", "64MHz",
            "--chan-width", "1MHz",
            "--num-scans", "2",
            "--field", "J0408-6545", "J1939-6342",
            "--calibrator", "J1331+3030",
            "--spec-avg", "4",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "pipeline failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["partition"]["plan"]["chans_per_sub_band"], 6);
    assert_eq!(json["averaging"]["chan_average"], true);
    assert_eq!(json["averaging"]["chan_bin"], 4);
    assert_eq!(json["imaging"]["num_taylor_terms"], 1);
    assert_eq!(json["imaging"]["deconvolver"], "clark");
    assert_eq!(json["parallel_imaging"], false);
    assert_eq!(json["fields"][1]["split"]["output_vis"], "obs.J1939-6342.ms");
    assert_eq!(
        json["fields"][0]["imaging"]["images"]["fits"],
        "images/obs_J0408-6545.im.fits"
    );
    assert_eq!(json["fields"][0]["imaging"]["imsize"][0], 2048);
    assert_eq!(json["fields"][2]["field"], "J1331+3030");
    assert_eq!(json["fields"][2]["role"], "calibrator");
    assert_eq!(json["fields"][2]["imaging"]["imsize"][1], 512);
    assert_eq!(json["fields"][2]["imaging"]["cell"], "2arcsec");
}

#[test]
fn test_pipeline_dry_run_doesnt_write() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("pipeline.toml");

    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "pipeline",
            "--vis", "obs.ms",
            "--bandwidth", "856MHz",
            "--chan-width", "208.984375kHz",
            "--output", &format!("{}", output.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "pipeline failed: {}", cmd.err().unwrap());
    assert!(!output.exists());
}

#[test]
fn test_pipeline_bad_time_bin() {
    #[rustfmt::skip]
    let cmd = spw_partition()
        .args([
            "pipeline",
            "--vis", "obs.ms",
            "--bandwidth", "856MHz",
            "--chan-width", "208.984375kHz",
            "--time-avg", "0s",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
}
