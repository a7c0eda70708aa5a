// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_defaults() {
    let avg = SplitAveraging::new(Some(208984.375), None, None).unwrap();
    assert!(!avg.chan_average);
    assert_eq!(avg.chan_bin.get(), 1);
    assert!(avg.time_average);
    assert_abs_diff_eq!(avg.time_bin_s, 8.0);
    assert_eq!(avg.time_bin(), "8s");
}

#[test]
fn test_chan_average_needs_two_channels() {
    let avg = SplitAveraging::new(Some(1e6), Some("1"), None).unwrap();
    assert!(!avg.chan_average);

    let avg = SplitAveraging::new(Some(1e6), Some("2"), None).unwrap();
    assert!(avg.chan_average);
    assert_eq!(avg.chan_bin.get(), 2);

    let avg = SplitAveraging::new(Some(1e6), Some("16"), Some("16s")).unwrap();
    assert!(avg.chan_average);
    assert_eq!(avg.chan_bin.get(), 16);
    assert_abs_diff_eq!(avg.time_bin_s, 16.0);
}

#[test]
fn test_chan_bin_from_resolution() {
    // 4 channels of 208.984375 kHz.
    let bin = parse_chan_bin(Some(208984.375), Some("835.9375kHz"), 1).unwrap();
    assert_eq!(bin.get(), 4);

    let bin = parse_chan_bin(Some(1e6), Some("4MHz"), 1).unwrap();
    assert_eq!(bin.get(), 4);

    // No channel width; assume a single channel.
    let bin = parse_chan_bin(None, Some("4MHz"), 1).unwrap();
    assert_eq!(bin.get(), 1);
}

#[test]
fn test_chan_bin_bad_inputs() {
    assert!(matches!(
        parse_chan_bin(Some(1e6), Some("0"), 1),
        Err(AveragingError::Zero)
    ));
    assert!(matches!(
        parse_chan_bin(Some(1e6), Some("0MHz"), 1),
        Err(AveragingError::Zero)
    ));
    assert!(matches!(
        parse_chan_bin(Some(1e6), Some("1.5"), 1),
        Err(AveragingError::NotInteger)
    ));
    assert!(matches!(
        parse_chan_bin(Some(1e6), Some("1.5MHz"), 1),
        Err(AveragingError::NotIntegerMultiple { .. })
    ));
    assert!(matches!(
        parse_chan_bin(Some(1e6), Some("4 parsecs"), 1),
        Err(AveragingError::Parse(_))
    ));
}

#[test]
fn test_time_bins() {
    assert_abs_diff_eq!(parse_time_bin("8").unwrap(), 8.0);
    assert_abs_diff_eq!(parse_time_bin("8s").unwrap(), 8.0);
    assert_abs_diff_eq!(parse_time_bin("500ms").unwrap(), 0.5);
    assert_abs_diff_eq!(parse_time_bin("2min").unwrap(), 120.0);
    assert_abs_diff_eq!(parse_time_bin("1h").unwrap(), 3600.0);

    assert!(matches!(
        parse_time_bin("0s"),
        Err(AveragingError::TimeBinNotPositive(_))
    ));
    assert!(matches!(
        parse_time_bin("-8"),
        Err(AveragingError::TimeBinNotPositive(_))
    ));
    assert!(matches!(
        parse_time_bin("eight seconds"),
        Err(AveragingError::Parse(_))
    ));
}

#[test]
fn test_split_task_args() {
    let avg = SplitAveraging::new(Some(208984.375), Some("835.9375kHz"), Some("16s")).unwrap();
    let args = SplitTaskArgs::new(
        Path::new("/data/obs.mms"),
        "J1939-6342",
        "0:880~933MHz",
        &avg,
        false,
    );
    assert_eq!(args.vis, PathBuf::from("/data/obs.mms"));
    assert_eq!(args.output_vis, PathBuf::from("/data/obs.J1939-6342.ms"));
    assert_eq!(args.data_column, "corrected");
    assert_eq!(args.field, "J1939-6342");
    assert_eq!(args.spw, "0:880~933MHz");
    assert!(!args.keep_flags);
    assert!(!args.create_mms);
    assert!(args.chan_average);
    assert_eq!(args.chan_bin.get(), 4);
    assert!(args.time_average);
    assert_eq!(args.time_bin, "16s");
    assert!(args.use_wt_spectrum);

    let avg = SplitAveraging::new(None, None, None).unwrap();
    let args = SplitTaskArgs::new(Path::new("obs.mms"), "3C286", "", &avg, true);
    assert_eq!(args.output_vis, PathBuf::from("obs.3C286.mms"));
    assert!(args.create_mms);
    assert!(!args.chan_average);
    assert_eq!(args.spw, "");
}
