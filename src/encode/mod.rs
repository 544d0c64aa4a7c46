//! BC7 block encoder.
//!
//! Every enabled mode is tried with each of its rotations and index modes. For a
//! given (mode, rotation, index mode) all shapes get a cheap line-fit estimate, the
//! best quarter of them are refined, and the lowest-error candidate over the whole
//! search is emitted. A solid-colour block takes a shortcut with precomputed
//! endpoint pairs and skips the search when that shortcut is lossless.

mod emit;
mod estimate;
mod indices;
mod optimize;
mod solid;

use crate::{
    color::Color32,
    decode::{decode_block, rotate},
    error::EncodeError,
    mode::{Bc7Mode, BC7_MODES},
    partition, BLOCK_SIZE,
};

/// Encoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Try the 3-region modes 0 and 2.
    pub allow_three_regions: bool,
    /// Only search mode 6. Much faster, lower quality on blocks with sharp edges.
    pub fast: bool,
    /// Whether the block may contain transparency. When `false` the
    /// alpha-dedicated partitioned mode 7 is skipped.
    pub has_alpha: bool,
    /// Compress the blocks of a texture in parallel. Only has an effect when the
    /// `rayon` feature is enabled.
    pub parallel: bool,
}

impl EncodeOptions {
    /// Mode 6 only.
    pub const FAST: Self = Self {
        allow_three_regions: false,
        fast: true,
        has_alpha: true,
        parallel: true,
    };
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            allow_three_regions: true,
            fast: false,
            has_alpha: true,
            parallel: true,
        }
    }
}

/// Result of encoding one block, with the statistics of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeReport {
    pub block: [u8; BLOCK_SIZE],
    pub mode: u8,
    /// Sum of squared 8-bit channel errors of the decoded block.
    pub error: u32,
    /// Lowest estimate the shape pre-pass produced for the selected mode, or
    /// `None` if the search never ran that mode.
    pub rough_error: Option<u32>,
}

/// A fully described encoding of one block.
///
/// Endpoints hold the stored codes, P-bits excluded. The P-bits of a mode with
/// shared P-bits are kept equal for both endpoints of a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub mode: u8,
    pub shape: u8,
    pub rotation: u8,
    pub index_mode: u8,
    pub endpoints: [[Color32; 2]; 3],
    pub p_bits: [[u8; 2]; 3],
    pub indices: [[u8; 16]; 2],
    pub error: u32,
}

impl Candidate {
    fn unset() -> Self {
        Self {
            error: u32::MAX,
            ..Default::default()
        }
    }
}

/// Search state shared by every shape of one (mode, rotation, index mode).
pub(crate) struct EncodeContext {
    pub mode: &'static Bc7Mode,
    pub rotation: u8,
    pub index_mode: u8,
    /// Block pixels with the rotation applied, so alpha holds the rotated channel.
    pub pixels: [Color32; 16],
}

impl EncodeContext {
    fn new(mode: &'static Bc7Mode, rotation: u8, index_mode: u8, pixels: &[Color32; 16]) -> Self {
        Self {
            mode,
            rotation,
            index_mode,
            pixels: pixels.map(|p| rotate(p, rotation)),
        }
    }

    pub fn plane_layout(&self) -> (usize, u8, usize, u8) {
        self.mode.plane_layout(self.index_mode)
    }

    fn candidate(&self, shape: usize) -> Candidate {
        Candidate {
            mode: self.mode.id,
            shape: shape as u8,
            rotation: self.rotation,
            index_mode: self.index_mode,
            ..Default::default()
        }
    }
}

/// Pixel numbers of one region of a shape.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Region {
    pixels: [u8; 16],
    len: usize,
}

impl Region {
    pub fn of(regions: usize, shape: usize, region: usize) -> Self {
        let mut result = Self {
            pixels: [0; 16],
            len: 0,
        };
        for (pixel, &r) in partition::partition(regions, shape).iter().enumerate() {
            if r as usize == region {
                result.pixels[result.len] = pixel as u8;
                result.len += 1;
            }
        }
        result
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..self.len]
    }
}

fn enabled_modes(options: &EncodeOptions) -> impl Iterator<Item = &'static Bc7Mode> + '_ {
    BC7_MODES.iter().filter(move |mode| {
        if options.fast {
            return mode.id == 6;
        }
        match mode.id {
            0 | 2 => options.allow_three_regions,
            7 => options.has_alpha,
            _ => true,
        }
    })
}

/// Estimates every shape, refines the best ones and returns the winner along
/// with the lowest estimate.
fn search_shapes(ctx: &EncodeContext) -> (Candidate, u32) {
    let shape_count = ctx.mode.shape_count();

    let mut estimates: Vec<Candidate> = (0..shape_count)
        .map(|shape| estimate::estimate_shape(ctx, shape))
        .collect();
    estimates.sort_by_key(|c| c.error);
    let rough_error = estimates[0].error;

    let keep = (shape_count / 4).max(1);
    estimates.truncate(keep);
    // Refine in shape order so equal errors resolve to the lowest shape
    estimates.sort_by_key(|c| c.shape);

    let mut best = Candidate::unset();
    for rough in estimates.iter() {
        let refined = refine(ctx, rough);
        if refined.error < best.error {
            best = refined;
        }
        if best.error == 0 {
            break;
        }
    }
    (best, rough_error)
}

fn refine(ctx: &EncodeContext, rough: &Candidate) -> Candidate {
    let mut candidate = *rough;
    let regions = ctx.mode.subsets();
    for region in 0..regions {
        let pixels = Region::of(regions, rough.shape as usize, region);
        optimize::optimize_region(
            ctx,
            &pixels,
            &mut candidate.endpoints[region],
            candidate.p_bits[region],
        );
    }
    candidate.error = indices::assign_indices(ctx, &mut candidate);
    indices::fix_anchors(ctx, &mut candidate);
    candidate
}

fn block_error(block: &[u8; BLOCK_SIZE], pixels: &[Color32; 16]) -> u32 {
    decode_block(block)
        .iter()
        .zip(pixels.iter())
        .map(|(&decoded, &pixel)| decoded.squared_error(pixel, 4))
        .sum()
}

/// Encodes 16 row-major pixels with channels in `[0, 1]`.
///
/// Channels outside `[0, 1]` are clamped and NaN is treated as 0.
pub fn encode_block(
    pixels: &[[f32; 4]],
    options: &EncodeOptions,
) -> Result<[u8; BLOCK_SIZE], EncodeError> {
    let pixels: &[[f32; 4]; 16] = pixels
        .try_into()
        .map_err(|_| EncodeError::InvalidPixelCount(pixels.len()))?;
    Ok(encode_block_rgba8(&pixels.map(Color32::from_unorm), options))
}

/// Encodes 16 row-major 8-bit pixels.
pub fn encode_block_rgba8(pixels: &[Color32; 16], options: &EncodeOptions) -> [u8; BLOCK_SIZE] {
    encode_block_with_report(pixels, options).block
}

/// Encodes 16 row-major 8-bit pixels and reports how the search went.
pub fn encode_block_with_report(pixels: &[Color32; 16], options: &EncodeOptions) -> EncodeReport {
    let mut best = solid::encode_solid(pixels, options).unwrap_or_else(Candidate::unset);
    let mut rough_errors: [Option<u32>; 8] = [None; 8];

    if best.error > 0 {
        'search: for mode in enabled_modes(options) {
            for rotation in 0..mode.rotation_count() {
                for index_mode in 0..mode.index_mode_count() {
                    let ctx = EncodeContext::new(mode, rotation, index_mode, pixels);
                    let (candidate, rough_error) = search_shapes(&ctx);

                    let slot = &mut rough_errors[mode.id as usize];
                    *slot = Some(slot.map_or(rough_error, |e| e.min(rough_error)));

                    if candidate.error < best.error {
                        best = candidate;
                    }
                    if best.error == 0 {
                        break 'search;
                    }
                }
            }
        }
    }

    let block = emit::emit_block(&best);
    let error = block_error(&block, pixels);
    debug_assert_eq!(error, best.error, "emitted block disagrees with the search");

    log::trace!(
        "Encoded block with mode {} shape {} rotation {} index mode {}, error {}",
        best.mode,
        best.shape,
        best.rotation,
        best.index_mode,
        error
    );

    EncodeReport {
        block,
        mode: best.mode,
        error,
        rough_error: rough_errors[best.mode as usize],
    }
}
