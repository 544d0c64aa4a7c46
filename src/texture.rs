//! Whole-texture helpers on top of the block codec.
//!
//! Textures are tightly packed row-major RGBA8. Blocks are stored row by row.
//! Tiles that overhang the right or bottom edge repeat the last column or row.

use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "std")]
use crate::{color::Color32, encode::{encode_block_rgba8, EncodeOptions}};
use crate::{decode::decode_block, error::TextureError, BLOCK_SIZE};

const BLOCK_WIDTH: usize = 4;
const BYTES_PER_PIXEL: usize = 4;

/// Number of blocks across and down a texture.
pub fn block_dimensions(width: usize, height: usize) -> (usize, usize) {
    (
        (width + BLOCK_WIDTH - 1) / BLOCK_WIDTH,
        (height + BLOCK_WIDTH - 1) / BLOCK_WIDTH,
    )
}

fn expected_len(width: usize, height: usize, bytes_per_item: usize) -> Result<usize, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimension);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(bytes_per_item))
        .ok_or(TextureError::TooLarge { width, height })
}

fn check_len(expected: usize, actual: usize) -> Result<(), TextureError> {
    if expected != actual {
        return Err(TextureError::InvalidLength { expected, actual });
    }
    Ok(())
}

/// Gathers the pixels of block (`bx`, `by`), clamping coordinates at the edges.
#[cfg(feature = "std")]
fn read_block(data: &[u8], width: usize, height: usize, bx: usize, by: usize) -> [Color32; 16] {
    let mut pixels = [Color32::default(); 16];
    for (i, pixel) in pixels.iter_mut().enumerate() {
        let x = (bx * BLOCK_WIDTH + i % BLOCK_WIDTH).min(width - 1);
        let y = (by * BLOCK_WIDTH + i / BLOCK_WIDTH).min(height - 1);
        let offset = (y * width + x) * BYTES_PER_PIXEL;
        pixel.0.copy_from_slice(&data[offset..offset + BYTES_PER_PIXEL]);
    }
    pixels
}

/// Compresses an RGBA8 texture into BC7 blocks.
#[cfg(feature = "std")]
pub fn compress_rgba8(
    width: usize,
    height: usize,
    data: &[u8],
    options: &EncodeOptions,
) -> Result<Vec<u8>, TextureError> {
    compress_rgba8_cancellable(width, height, data, options, &AtomicBool::new(false))
}

/// Compresses an RGBA8 texture, stopping with [`TextureError::Cancelled`] once
/// `cancel` is set.
///
/// The flag is checked before every block, so cancellation takes effect
/// within one block's encoding time per worker.
#[cfg(feature = "std")]
pub fn compress_rgba8_cancellable(
    width: usize,
    height: usize,
    data: &[u8],
    options: &EncodeOptions,
    cancel: &AtomicBool,
) -> Result<Vec<u8>, TextureError> {
    check_len(expected_len(width, height, BYTES_PER_PIXEL)?, data.len())?;

    let (blocks_x, blocks_y) = block_dimensions(width, height);
    let row_bytes = blocks_x * BLOCK_SIZE;
    let mut output = vec![0; row_bytes * blocks_y];

    let compress_row = |(by, out): (usize, &mut [u8])| -> Result<(), TextureError> {
        for (bx, block) in out.chunks_exact_mut(BLOCK_SIZE).enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return Err(TextureError::Cancelled);
            }
            let pixels = read_block(data, width, height, bx, by);
            let options = EncodeOptions {
                has_alpha: options.has_alpha && pixels.iter().any(|p| p[3] != 255),
                ..*options
            };
            block.copy_from_slice(&encode_block_rgba8(&pixels, &options));
        }
        Ok(())
    };

    #[cfg(feature = "rayon")]
    if options.parallel {
        use rayon::iter::{IndexedParallelIterator, ParallelIterator};
        use rayon::slice::ParallelSliceMut;

        output
            .par_chunks_exact_mut(row_bytes)
            .enumerate()
            .try_for_each(&compress_row)?;

        log::debug!(
            "Compressed {}x{} texture into {} blocks in parallel",
            width,
            height,
            blocks_x * blocks_y
        );
        return Ok(output);
    }

    output
        .chunks_exact_mut(row_bytes)
        .enumerate()
        .try_for_each(&compress_row)?;

    log::debug!(
        "Compressed {}x{} texture into {} blocks",
        width,
        height,
        blocks_x * blocks_y
    );
    Ok(output)
}

/// Decompresses BC7 blocks into an RGBA8 texture.
///
/// Corrupt blocks come out as transparent black.
pub fn decompress_rgba8(
    width: usize,
    height: usize,
    blocks: &[u8],
) -> Result<Vec<u8>, TextureError> {
    let output_len = expected_len(width, height, BYTES_PER_PIXEL)?;
    let (blocks_x, blocks_y) = block_dimensions(width, height);
    check_len(blocks_x * blocks_y * BLOCK_SIZE, blocks.len())?;

    let mut output = vec![0; output_len];
    for (i, chunk) in blocks.chunks_exact(BLOCK_SIZE).enumerate() {
        let (bx, by) = (i % blocks_x, i / blocks_x);
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(chunk);

        for (p, pixel) in decode_block(&block).iter().enumerate() {
            let x = bx * BLOCK_WIDTH + p % BLOCK_WIDTH;
            let y = by * BLOCK_WIDTH + p / BLOCK_WIDTH;
            if x >= width || y >= height {
                continue;
            }
            let offset = (y * width + x) * BYTES_PER_PIXEL;
            output[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&pixel.0);
        }
    }

    log::debug!(
        "Decompressed {} blocks into a {}x{} texture",
        blocks_x * blocks_y,
        width,
        height
    );
    Ok(output)
}
