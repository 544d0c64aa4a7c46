#![warn(clippy::all)]

use bc7::{
    decode_block, decode_block_f32, encode_block, encode_block_rgba8, encode_block_with_report,
    unpack_block, Color32, EncodeError, EncodeOptions,
};
use rstest::rstest;

mod common;

use common::{checkerboard, init_logger, mean_abs_error, noise, solid, to_unorm, LsbDisplay};

const MAX_MEAN_ABS_ERROR: f32 = 8.0;

fn assert_close(pixels: &[Color32; 16], block: &[u8; 16]) {
    let decoded = decode_block(block);
    let mae = mean_abs_error(pixels, &decoded);
    assert!(
        mae.iter().all(|&e| e <= MAX_MEAN_ABS_ERROR),
        "mean abs error {:?}\nblock {}\nexpected {:?}\ndecoded {:?}",
        mae,
        LsbDisplay(block),
        pixels,
        decoded
    );
}

#[rstest]
#[case::mid_gray(Color32::new(128, 128, 128, 255))]
#[case::opaque_black(Color32::new(0, 0, 0, 255))]
#[case::white(Color32::new(255, 255, 255, 255))]
#[case::transparent_black(Color32::new(0, 0, 0, 0))]
#[case::odd_values(Color32::new(13, 201, 77, 255))]
#[case::translucent(Color32::new(1, 2, 3, 4))]
fn solid_blocks_are_lossless(#[case] color: Color32) {
    init_logger();
    let pixels = solid(color);
    let report = encode_block_with_report(&pixels, &EncodeOptions::default());
    assert_eq!(report.error, 0, "block {}", LsbDisplay(&report.block));
    assert_eq!(decode_block(&report.block), pixels);
}

#[test]
fn solid_mid_gray_uses_a_single_region() {
    let pixels = solid(Color32::new(128, 128, 128, 255));
    let block = encode_block_rgba8(&pixels, &EncodeOptions::default());
    let unpacked = unpack_block(&block).unwrap();
    assert_eq!(unpacked.descriptor().subset_count, 1);
    assert_eq!(decode_block(&block), [Color32::new(128, 128, 128, 255); 16]);
}

#[test]
fn exactly_representable_solid_has_equal_endpoints() {
    let pixels = solid(Color32::new(254, 254, 254, 254));
    let block = encode_block_rgba8(&pixels, &EncodeOptions::default());
    let unpacked = unpack_block(&block).unwrap();
    assert_eq!(unpacked.descriptor().subset_count, 1);
    assert_eq!(unpacked.endpoints[0][0], unpacked.endpoints[0][1]);
    assert_eq!(decode_block(&block), pixels);
}

#[rstest]
#[case::black_white(Color32::new(0, 0, 0, 255), Color32::new(255, 255, 255, 255))]
#[case::red_blue(Color32::new(255, 0, 0, 255), Color32::new(0, 0, 255, 255))]
#[case::alpha(Color32::new(40, 90, 10, 0), Color32::new(200, 30, 140, 255))]
fn checkerboards_round_trip(#[case] a: Color32, #[case] b: Color32) {
    init_logger();
    let pixels = checkerboard(a, b);
    let report = encode_block_with_report(&pixels, &EncodeOptions::default());
    assert_close(&pixels, &report.block);
    if let Some(rough) = report.rough_error {
        assert!(report.error <= rough);
    }
}

#[rstest]
#[case::gray(1, Color32::new(128, 128, 128, 255))]
#[case::warm(2, Color32::new(200, 120, 60, 255))]
#[case::translucent(3, Color32::new(60, 160, 220, 128))]
fn noise_round_trips_and_refinement_never_regresses(#[case] seed: u64, #[case] base: Color32) {
    init_logger();
    let pixels = noise(seed, base, 8);
    let report = encode_block_with_report(&pixels, &EncodeOptions::default());
    assert_close(&pixels, &report.block);

    let rough = report
        .rough_error
        .expect("a noisy block always goes through the search");
    assert!(
        report.error <= rough,
        "error {} rough {} mode {}",
        report.error,
        rough,
        report.mode
    );
}

#[test]
fn fast_mode_only_uses_mode_6() {
    let pixels = noise(4, Color32::new(90, 30, 200, 255), 20);
    let report = encode_block_with_report(&pixels, &EncodeOptions::FAST);
    assert_eq!(report.mode, 6);
    assert_eq!(unpack_block(&report.block).unwrap().mode, 6);
    assert!(report.error <= report.rough_error.unwrap());
}

/// Red, green and blue columns, with blue filling the last two.
fn three_stripes() -> [Color32; 16] {
    let colors = [
        Color32::new(255, 0, 0, 255),
        Color32::new(0, 255, 0, 255),
        Color32::new(0, 0, 255, 255),
    ];
    let mut pixels = [colors[0]; 16];
    for (i, p) in pixels.iter_mut().enumerate() {
        *p = colors[(i % 4).min(2)];
    }
    pixels
}

#[test]
fn three_region_modes_fit_three_stripes() {
    init_logger();
    let pixels = three_stripes();
    let report = encode_block_with_report(&pixels, &EncodeOptions::default());
    assert!([0, 2].contains(&report.mode), "mode {}", report.mode);
    assert_eq!(report.error, 0, "block {}", LsbDisplay(&report.block));
    assert_eq!(decode_block(&report.block), pixels);
    assert_eq!(unpack_block(&report.block).unwrap().descriptor().subset_count, 3);
}

#[test]
fn disabled_modes_are_skipped() {
    let pixels = three_stripes();
    let options = EncodeOptions {
        allow_three_regions: false,
        has_alpha: false,
        ..Default::default()
    };
    let report = encode_block_with_report(&pixels, &options);
    assert!(![0, 2, 7].contains(&report.mode), "mode {}", report.mode);
    assert_close(&pixels, &report.block);
}

#[test]
fn encoding_is_deterministic() {
    let pixels = noise(5, Color32::new(30, 60, 90, 200), 30);
    let options = EncodeOptions {
        allow_three_regions: false,
        ..Default::default()
    };
    let first = encode_block_rgba8(&pixels, &options);
    let second = encode_block_rgba8(&pixels, &options);
    assert_eq!(first, second);
}

#[test]
fn float_input_matches_rgba8() {
    let pixels = noise(6, Color32::new(100, 100, 100, 255), 10);
    let from_float = encode_block(&to_unorm(&pixels), &EncodeOptions::FAST).unwrap();
    assert_eq!(from_float, encode_block_rgba8(&pixels, &EncodeOptions::FAST));

    let decoded = decode_block_f32(&from_float);
    for (f, c) in decoded.iter().zip(decode_block(&from_float).iter()) {
        assert_eq!(*f, c.to_unorm());
    }
}

#[test]
fn wrong_pixel_count_is_rejected() {
    let pixels = vec![[0.25f32; 4]; 12];
    assert_eq!(
        encode_block(&pixels, &EncodeOptions::default()),
        Err(EncodeError::InvalidPixelCount(12))
    );
    assert_eq!(
        encode_block(&[], &EncodeOptions::default()),
        Err(EncodeError::InvalidPixelCount(0))
    );
}

#[test]
fn out_of_range_and_nan_inputs_are_clamped() {
    let pixels = [[f32::NAN, -1.0, 2.0, f32::INFINITY]; 16];
    let block = encode_block(&pixels, &EncodeOptions::default()).unwrap();
    assert_eq!(decode_block(&block), [Color32::new(0, 0, 255, 255); 16]);
}
