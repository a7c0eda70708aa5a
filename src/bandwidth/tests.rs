// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use super::*;
use crate::spw::parse_spw_selection;

const MEERKAT_BANDWIDTH: f64 = 856e6;
const MEERKAT_CHAN_WIDTH: f64 = 208984.375;

fn bw(s: &str, chan_width_hz: f64) -> f64 {
    effective_bandwidth(
        &parse_spw_selection(s).unwrap(),
        chan_width_hz,
        MEERKAT_BANDWIDTH,
    )
}

#[test]
fn test_channel_range() {
    assert_abs_diff_eq!(bw("100~200", 1e6), 1e8);
    assert_abs_diff_eq!(bw("0:100~200", 1e6), 1e8);
}

#[test]
fn test_freq_range_ignores_chan_width() {
    assert_abs_diff_eq!(bw("0~50MHz", 1e6), 50e6);
    assert_abs_diff_eq!(bw("0~50MHz", MEERKAT_CHAN_WIDTH), 50e6);
    assert_abs_diff_eq!(bw("0~50MHz", 1.0), 50e6);
}

#[test]
fn test_single_points_count_as_one_channel() {
    assert_abs_diff_eq!(bw("150", MEERKAT_CHAN_WIDTH), MEERKAT_CHAN_WIDTH);
    assert_abs_diff_eq!(bw("1420.4MHz", MEERKAT_CHAN_WIDTH), MEERKAT_CHAN_WIDTH);
    assert_abs_diff_eq!(bw("100~100", 1e6), 1e6);

    let sel = parse_spw_selection("1420.4MHz,100~200,1.6GHz").unwrap();
    match sel {
        SpwSelection::Ranges(set) => assert_eq!(set.num_freq_points(), 2),
        SpwSelection::Whole => unreachable!(),
    }
}

#[test]
fn test_whole_band() {
    assert_eq!(bw("", MEERKAT_CHAN_WIDTH), MEERKAT_BANDWIDTH);
    assert_eq!(
        effective_bandwidth(&SpwSelection::Whole, 1.0, 123.456),
        123.456
    );
}

#[test]
fn test_multi_range_selection() {
    // The MeerKAT L-band RFI-free windows.
    assert_abs_diff_eq!(
        bw("0:880~933MHz;960~1010MHz,0:1100~1300MHz", MEERKAT_CHAN_WIDTH),
        (53.0 + 50.0 + 200.0) * 1e6,
        epsilon = 1e-3
    );
    // Mixing channels and frequencies.
    assert_abs_diff_eq!(bw("100~200,0~50MHz", 1e6), 150e6);
}

#[test]
fn test_units_are_equivalent() {
    let expected = bw("880~933MHz", MEERKAT_CHAN_WIDTH);
    assert_abs_diff_eq!(bw("0.88~0.933GHz", MEERKAT_CHAN_WIDTH), expected, epsilon = 1e-3);
    assert_abs_diff_eq!(bw("880000~933000kHz", MEERKAT_CHAN_WIDTH), expected, epsilon = 1e-3);
    assert_abs_diff_eq!(
        bw("880000000~933000000Hz", MEERKAT_CHAN_WIDTH),
        expected,
        epsilon = 1e-3
    );
}

proptest! {
    #[test]
    fn mhz_and_hz_ranges_agree(
        lower in 0.0f64..2000.0,
        width in 0.001f64..500.0,
        chan_width in 1.0f64..1e7,
    ) {
        let upper = lower + width;
        let mhz = bw(&format!("{lower}~{upper}MHz"), chan_width);
        let hz = bw(&format!("{}~{}Hz", lower * 1e6, upper * 1e6), chan_width);
        prop_assert!((mhz - hz).abs() <= 1e-6 * mhz.abs().max(1.0));
    }

    #[test]
    fn clauses_sum_to_the_whole(
        clauses in prop::collection::vec(
            (0u32..4096, 0u32..4096, any::<bool>()),
            1..8,
        ),
        chan_width in 1.0f64..1e7,
    ) {
        let clause_strings: Vec<String> = clauses
            .iter()
            .map(|&(a, b, as_freq)| {
                if as_freq {
                    format!("{a}~{b}kHz")
                } else {
                    format!("{a}~{b}")
                }
            })
            .collect();
        let total = bw(&clause_strings.join(","), chan_width);
        let sum: f64 = clause_strings.iter().map(|c| bw(c, chan_width)).sum();
        prop_assert!((total - sum).abs() <= 1e-9 * total.abs().max(1.0));
        prop_assert!(total >= 0.0);
    }
}
