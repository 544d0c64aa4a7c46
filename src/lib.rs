//! BC7 (BPTC UNORM) texture block codec.
//!
//! A BC7 block stores a 4x4 tile of RGBA pixels in 128 bits using one of
//! eight modes. [`decode_block`] expands any block to 16 colours and works
//! without `std`. The encoder ([`encode_block`] and friends) and texture
//! compression need the default `std` feature; the `rayon` feature compresses
//! textures in parallel.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(clippy::all)]

extern crate alloc;

#[doc(hidden)]
#[macro_export]
macro_rules! mask {
    ($size:expr) => {
        !(!($size ^ $size)).checked_shl($size as u32).unwrap_or(0)
    };
}

/// Size of a compressed block in bytes.
pub const BLOCK_SIZE: usize = 16;
/// Size of a compressed block in bits.
pub const BLOCK_BITS: usize = BLOCK_SIZE * 8;

mod bitreader;
#[cfg(any(feature = "std", test))]
mod bitwriter;
pub mod color;
mod decode;
#[cfg(feature = "std")]
mod encode;
mod error;
pub mod mode;
pub mod partition;
mod texture;

pub use color::Color32;
pub use decode::{decode_block, decode_block_f32, unpack_block, UnpackedBlock};
#[cfg(feature = "std")]
pub use encode::{
    encode_block, encode_block_rgba8, encode_block_with_report, EncodeOptions, EncodeReport,
};
pub use error::{BlockError, EncodeError, TextureError};
pub use texture::{block_dimensions, decompress_rgba8};
#[cfg(feature = "std")]
pub use texture::{compress_rgba8, compress_rgba8_cancellable};
