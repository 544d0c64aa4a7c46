use super::{Candidate, EncodeContext, Region};
use crate::{
    color::{
        interpolate, interpolate_color, unquantize, unquantize_with_pbit, Color32, ALPHA_CHANNEL,
    },
    mode::{Bc7Mode, PBits},
    partition,
};

/// Expands stored endpoint codes to 8 bits. Alpha is 255 for modes without alpha.
pub(crate) fn decode_endpoints(
    mode: &Bc7Mode,
    codes: &[Color32; 2],
    p_bits: [u8; 2],
) -> [Color32; 2] {
    let mut result = [Color32::new(0, 0, 0, 255); 2];
    for ((out, code), &p) in result.iter_mut().zip(codes.iter()).zip(p_bits.iter()) {
        for channel in 0..4 {
            let bits = mode.channel_bits(channel);
            if bits == 0 {
                continue;
            }
            out[channel] = match mode.p_bits {
                PBits::None => unquantize(code[channel], bits),
                _ => unquantize_with_pbit(code[channel], p, bits),
            };
        }
    }
    result
}

/// Every colour one endpoint pair can decode to.
pub(crate) struct Palette {
    colors: [Color32; 16],
    color_len: usize,
    alphas: [u8; 16],
    alpha_len: usize,
    dual_plane: bool,
}

impl Palette {
    pub fn new(ctx: &EncodeContext, endpoints: &[Color32; 2]) -> Self {
        let (_, color_bits, _, alpha_bits) = ctx.plane_layout();
        let [e0, e1] = *endpoints;

        let mut palette = Self {
            colors: [Color32::default(); 16],
            color_len: 1 << color_bits,
            alphas: [0; 16],
            alpha_len: 1 << alpha_bits,
            dual_plane: ctx.mode.is_dual_plane(),
        };
        for (i, color) in palette.colors.iter_mut().take(palette.color_len).enumerate() {
            *color = interpolate_color(e0, e1, i as u8, color_bits, i as u8, color_bits);
        }
        for (i, alpha) in palette.alphas.iter_mut().take(palette.alpha_len).enumerate() {
            *alpha = interpolate(e0[ALPHA_CHANNEL], e1[ALPHA_CHANNEL], i as u8, alpha_bits);
        }
        palette
    }

    /// Lowest-error entry for `pixel` as `(color_index, alpha_index, error)`.
    ///
    /// Single-plane modes return the same index twice.
    pub fn nearest(&self, pixel: Color32) -> (u8, u8, u32) {
        if !self.dual_plane {
            let (index, error) = nearest_entry(&self.colors[..self.color_len], |c| {
                c.squared_error(pixel, 4)
            });
            return (index, index, error);
        }

        let (color_index, color_error) =
            nearest_entry(&self.colors[..self.color_len], |c| c.squared_error(pixel, 3));
        let (alpha_index, alpha_error) = nearest_entry(&self.alphas[..self.alpha_len], |&a| {
            let diff = a as i32 - pixel[ALPHA_CHANNEL] as i32;
            (diff * diff) as u32
        });
        (color_index, alpha_index, color_error + alpha_error)
    }
}

fn nearest_entry<T>(entries: &[T], error: impl Fn(&T) -> u32) -> (u8, u32) {
    let mut best = (0, u32::MAX);
    for (i, entry) in entries.iter().enumerate() {
        let e = error(entry);
        if e < best.1 {
            best = (i as u8, e);
            if e == 0 {
                break;
            }
        }
    }
    best
}

/// Error of a region when every pixel takes its best palette entry.
pub(crate) fn region_error(
    ctx: &EncodeContext,
    region: &Region,
    codes: &[Color32; 2],
    p_bits: [u8; 2],
) -> u32 {
    let endpoints = decode_endpoints(ctx.mode, codes, p_bits);
    let palette = Palette::new(ctx, &endpoints);
    region
        .pixels()
        .iter()
        .map(|&pixel| palette.nearest(ctx.pixels[pixel as usize]).2)
        .sum()
}

/// Picks the best index of every pixel and returns the total error.
pub(crate) fn assign_indices(ctx: &EncodeContext, candidate: &mut Candidate) -> u32 {
    let regions = ctx.mode.subsets();
    let (color_plane, _, alpha_plane, _) = ctx.plane_layout();

    let mut total = 0;
    for region in 0..regions {
        let endpoints = decode_endpoints(
            ctx.mode,
            &candidate.endpoints[region],
            candidate.p_bits[region],
        );
        let palette = Palette::new(ctx, &endpoints);
        for &pixel in Region::of(regions, candidate.shape as usize, region).pixels() {
            let pixel = pixel as usize;
            let (color_index, alpha_index, error) = palette.nearest(ctx.pixels[pixel]);
            candidate.indices[alpha_plane][pixel] = alpha_index;
            candidate.indices[color_plane][pixel] = color_index;
            total += error;
        }
    }
    total
}

fn invert_indices(indices: &mut [u8; 16], pixels: &[u8], bits: u8) {
    let max = (1u8 << bits) - 1;
    for &pixel in pixels {
        indices[pixel as usize] = max - indices[pixel as usize];
    }
}

/// Makes the top bit of every fix-up index zero.
///
/// A region whose fix-up index has its top bit set gets its endpoints swapped
/// and its indices mirrored, which decodes to the same colours. Dual-plane
/// modes do this per plane, swapping only the channels that plane drives.
pub(crate) fn fix_anchors(ctx: &EncodeContext, candidate: &mut Candidate) {
    let mode = ctx.mode;
    let regions = mode.subsets();
    let shape = candidate.shape as usize;

    if !mode.is_dual_plane() {
        let bits = mode.weight_bits;
        for region in 0..regions {
            let anchor = partition::fixup_pixel(regions, shape, region) as usize;
            if candidate.indices[0][anchor] >> (bits - 1) == 0 {
                continue;
            }
            candidate.endpoints[region].swap(0, 1);
            candidate.p_bits[region].swap(0, 1);
            let pixels = Region::of(regions, shape, region);
            invert_indices(&mut candidate.indices[0], pixels.pixels(), bits);
        }
        return;
    }

    let (color_plane, _, _, _) = ctx.plane_layout();
    let all_pixels = Region::of(1, 0, 0);
    for plane in 0..2 {
        let bits = mode.plane_bits(plane);
        if candidate.indices[plane][0] >> (bits - 1) == 0 {
            continue;
        }
        let channels = if plane == color_plane { 0..3 } else { 3..4 };
        let [e0, e1] = &mut candidate.endpoints[0];
        for channel in channels {
            core::mem::swap(&mut e0[channel], &mut e1[channel]);
        }
        invert_indices(&mut candidate.indices[plane], all_pixels.pixels(), bits);
    }
}
