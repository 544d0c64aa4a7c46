use thiserror::Error;

/// A block that cannot be decoded.
///
/// The public decoders never return this: they substitute transparent black
/// for the block instead. [`unpack_block`](crate::unpack_block) exposes it for
/// callers that want to tell corrupt blocks apart.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    /// The mode prefix has no set bit within the first 8 bits.
    #[error("reserved block mode")]
    ReservedMode,

    /// A field would extend past the end of the 128-bit block.
    #[error("reading {count} bits at bit {pos} overruns the block")]
    Overrun { pos: usize, count: usize },
}

/// Errors returned by the block encoder.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A block is exactly 16 pixels.
    #[error("expected 16 pixels for a 4x4 block, got {0}")]
    InvalidPixelCount(usize),
}

/// Errors returned by the texture helpers.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    /// The width or height of the texture is zero.
    #[error("texture width and height must be non-zero")]
    ZeroDimension,

    /// The texture size does not fit in memory.
    #[error("texture of {width}x{height} pixels is too large")]
    TooLarge { width: usize, height: usize },

    /// The input buffer does not match the texture dimensions.
    #[error("expected {expected} bytes of input, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The operation was cancelled by the caller.
    #[error("compression was cancelled")]
    Cancelled,
}
