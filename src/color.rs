use core::fmt;
use core::ops::{Add, Index, IndexMut, Sub};

pub const ALPHA_CHANNEL: usize = 3;

/// 8-bit RGBA color.
///
/// Arithmetic is channel-wise and saturating.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Color32(pub [u8; 4]);

impl Color32 {
    pub const TRANSPARENT_BLACK: Self = Self([0, 0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn to_rgba_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Converts normalized `[0, 1]` channels, rounding to nearest. NaN maps to 0.
    pub fn from_unorm(rgba: [f32; 4]) -> Self {
        let mut result = Self::default();
        for (out, &v) in result.0.iter_mut().zip(rgba.iter()) {
            let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
            *out = (v * 255.0 + 0.5) as u8;
        }
        result
    }

    pub fn to_unorm(self) -> [f32; 4] {
        self.0.map(|c| c as f32 / 255.0)
    }

    /// Clamps every channel into the range given by the matching channels of
    /// `lo` and `hi`.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        let mut result = self;
        for (c, (&l, &h)) in result.0.iter_mut().zip(lo.0.iter().zip(hi.0.iter())) {
            *c = (*c).clamp(l, h);
        }
        result
    }

    pub fn abs_diff(self, other: Self) -> Self {
        (self - other) + (other - self)
    }

    /// Sum of squared channel differences over the first `channels` channels.
    pub fn squared_error(self, other: Self, channels: usize) -> u32 {
        self.abs_diff(other).0[..channels]
            .iter()
            .map(|&d| d as u32 * d as u32)
            .sum()
    }
}

impl Add for Color32 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut result = self;
        for (c, &r) in result.0.iter_mut().zip(rhs.0.iter()) {
            *c = c.saturating_add(r);
        }
        result
    }
}

impl Sub for Color32 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let mut result = self;
        for (c, &r) in result.0.iter_mut().zip(rhs.0.iter()) {
            *c = c.saturating_sub(r);
        }
        result
    }
}

impl fmt::Debug for Color32 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:08X}", self.to_rgba_u32())
    }
}

impl Index<usize> for Color32 {
    type Output = u8;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Color32 {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

/// Reduces an 8-bit value to `bits` bits with biased rounding.
pub fn quantize(v: u8, bits: u8) -> u8 {
    assert!((1..=8).contains(&bits));
    if bits == 8 {
        return v;
    }
    let rounded = (v as u16 + (1 << (7 - bits))).min(255);
    (rounded >> (8 - bits)) as u8
}

/// Expands a `bits`-bit value to 8 bits by replicating its top bits downward.
pub fn unquantize(v: u8, bits: u8) -> u8 {
    assert!((1..=8).contains(&bits));
    // Left align bits
    let mut bits_la = (v as u16 & mask!(bits as u16)) << (8 - bits);
    let mut val: u16 = 0;
    // Repeat bits into val
    while bits_la > 0 {
        val |= bits_la;
        bits_la >>= bits;
    }
    val as u8
}

/// Expands a stored value with its P-bit appended as the new lowest bit.
pub fn unquantize_with_pbit(v: u8, p: u8, bits: u8) -> u8 {
    unquantize((v << 1) | (p & 1), bits + 1)
}

const WEIGHTS_2: [u8; 4] = [0, 21, 43, 64];
const WEIGHTS_3: [u8; 8] = [0, 9, 18, 27, 37, 46, 55, 64];
const WEIGHTS_4: [u8; 16] = [0, 4, 9, 13, 17, 21, 26, 30, 34, 38, 43, 47, 51, 55, 60, 64];

pub fn weight(index: u8, bits: u8) -> u8 {
    let lut = match bits {
        2 => &WEIGHTS_2[..],
        3 => &WEIGHTS_3[..],
        4 => &WEIGHTS_4[..],
        _ => unreachable!(),
    };
    lut[index as usize]
}

pub fn interpolate(a: u8, b: u8, index: u8, bits: u8) -> u8 {
    let w = weight(index, bits) as u32;
    ((a as u32 * (64 - w) + b as u32 * w + 32) >> 6) as u8
}

/// Interpolates RGB with one index and alpha with another.
pub fn interpolate_color(
    e0: Color32,
    e1: Color32,
    color_index: u8,
    color_bits: u8,
    alpha_index: u8,
    alpha_bits: u8,
) -> Color32 {
    Color32::new(
        interpolate(e0[0], e1[0], color_index, color_bits),
        interpolate(e0[1], e1[1], color_index, color_bits),
        interpolate(e0[2], e1[2], color_index, color_bits),
        interpolate(e0[3], e1[3], alpha_index, alpha_bits),
    )
}

#[cfg(feature = "std")]
pub use hdr::*;

#[cfg(feature = "std")]
mod hdr {
    use super::Color32;
    use glam::Vec4;

    /// Working color of the encoder, channels in `[0, 255]`.
    pub type ColorF32 = Vec4;

    pub fn to_hdr(c: Color32) -> ColorF32 {
        Vec4::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32)
    }

    pub fn from_hdr(c: ColorF32) -> Color32 {
        let c = c.clamp(Vec4::ZERO, Vec4::splat(255.0)).round();
        Color32::new(c.x as u8, c.y as u8, c.z as u8, c.w as u8)
    }
}
