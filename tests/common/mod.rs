#![allow(dead_code)]

use std::fmt;

use bc7::Color32;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Prints a block as binary, highest byte first, so bit 0 is the rightmost.
pub struct LsbDisplay<'a>(pub &'a [u8]);

impl fmt::Display for LsbDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.0.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:08b}", b)?;
        }
        write!(f, " <=]")
    }
}

pub fn solid(color: Color32) -> [Color32; 16] {
    [color; 16]
}

pub fn checkerboard(a: Color32, b: Color32) -> [Color32; 16] {
    let mut pixels = [a; 16];
    for (i, p) in pixels.iter_mut().enumerate() {
        if (i % 4 + i / 4) % 2 == 1 {
            *p = b;
        }
    }
    pixels
}

/// Noise of +-`amplitude` around `base`, seeded for reproducibility.
pub fn noise(seed: u64, base: Color32, amplitude: u8) -> [Color32; 16] {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pixels = [base; 16];
    for p in pixels.iter_mut() {
        for c in 0..4 {
            let offset = rng.gen_range(-(amplitude as i32)..=amplitude as i32);
            p[c] = (base[c] as i32 + offset).clamp(0, 255) as u8;
        }
    }
    pixels
}

pub fn to_unorm(pixels: &[Color32; 16]) -> Vec<[f32; 4]> {
    pixels.iter().map(|p| p.to_unorm()).collect()
}

/// Mean absolute error per channel.
pub fn mean_abs_error(a: &[Color32], b: &[Color32]) -> [f32; 4] {
    assert_eq!(a.len(), b.len());
    let mut sums = [0u32; 4];
    for (x, y) in a.iter().zip(b.iter()) {
        for (c, sum) in sums.iter_mut().enumerate() {
            *sum += (x[c] as i32 - y[c] as i32).unsigned_abs();
        }
    }
    sums.map(|s| s as f32 / a.len() as f32)
}

pub fn squared_error(a: &[Color32], b: &[Color32]) -> u32 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x.squared_error(y, 4)).sum()
}

/// RGBA8 test image: a diagonal ramp driving every channel, so each 4x4 tile
/// lies close to a single colour line.
pub fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let steps = (width + height - 2).max(1);
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let t = ((x + y) * 255 / steps) as u8;
            data.extend_from_slice(&[t, 255 - t, t / 2 + 64, 255 - t / 4]);
        }
    }
    data
}
