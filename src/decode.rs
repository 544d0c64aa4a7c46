use crate::{
    bitreader::BitReaderLsb,
    color::{interpolate_color, unquantize, unquantize_with_pbit, Color32, ALPHA_CHANNEL},
    error::BlockError,
    mode::{Bc7Mode, BC7_MODES},
    partition, BLOCK_BITS, BLOCK_SIZE,
};

/// Fields of a block after parsing, before interpolation.
///
/// Endpoints are already expanded to 8 bits with their P-bits folded in.
/// Unused regions and the second index plane of single-plane modes are zero.
///
/// Values returned by [`unpack_block`] are always consistent. A block built by
/// hand must keep `mode` below 8, `shape` within the mode's shape count and
/// indices within the mode's index precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnpackedBlock {
    pub mode: u8,
    pub shape: u8,
    pub rotation: u8,
    pub index_mode: u8,
    pub endpoints: [[Color32; 2]; 3],
    pub indices: [[u8; 16]; 2],
}

impl UnpackedBlock {
    /// # Panics
    ///
    /// Panics if `mode` is not a valid mode number.
    pub fn descriptor(&self) -> &'static Bc7Mode {
        &BC7_MODES[self.mode as usize]
    }

    /// Interpolates every pixel and undoes the rotation.
    ///
    /// # Panics
    ///
    /// Panics on a hand-built block with an invalid mode, shape or index.
    pub fn to_rgba(&self) -> [Color32; 16] {
        let mode = self.descriptor();
        let (color_plane, color_bits, alpha_plane, alpha_bits) =
            mode.plane_layout(self.index_mode);
        let regions = partition::partition(mode.subsets(), self.shape as usize);

        let mut output = [Color32::default(); 16];
        for (pixel, out) in output.iter_mut().enumerate() {
            let [e0, e1] = self.endpoints[regions[pixel] as usize];
            let color = interpolate_color(
                e0,
                e1,
                self.indices[color_plane][pixel],
                color_bits,
                self.indices[alpha_plane][pixel],
                alpha_bits,
            );
            *out = rotate(color, self.rotation);
        }
        output
    }
}

/// Swaps alpha with red, green or blue for rotation 1, 2 or 3.
///
/// The swap is its own inverse, so the encoder uses it to move a channel into
/// the alpha slot before fitting.
pub fn rotate(color: Color32, rotation: u8) -> Color32 {
    let mut color = color;
    if rotation > 0 {
        color.0.swap(ALPHA_CHANNEL, rotation as usize - 1);
    }
    color
}

fn decode_mode(reader: &mut BitReaderLsb) -> Result<u8, BlockError> {
    for mode in 0..BC7_MODES.len() as u8 {
        if reader.read_bool()? {
            return Ok(mode);
        }
    }
    Err(BlockError::ReservedMode)
}

/// Parses a block into its fields.
pub fn unpack_block(block: &[u8; BLOCK_SIZE]) -> Result<UnpackedBlock, BlockError> {
    let mut reader = BitReaderLsb::new(block);

    let mode_id = decode_mode(&mut reader)?;
    let mode = &BC7_MODES[mode_id as usize];

    let shape = reader.read_u8(mode.pat_bits as usize)?;
    let rotation = reader.read_u8(mode.rotation_bits as usize)?;
    let index_mode = reader.read_u8(mode.index_mode_bits as usize)?;

    let endpoint_count = mode.endpoint_count();

    let mut codes = [[0u8; 4]; 6];
    for channel in 0..4 {
        let bit_count = mode.channel_bits(channel) as usize;
        for code in codes.iter_mut().take(endpoint_count) {
            code[channel] = reader.read_u8(bit_count)?;
        }
    }

    let mut p_bits = [0u8; 6];
    for p in p_bits.iter_mut().take(mode.pbit_count()) {
        *p = reader.read_u8(1)?;
    }

    let mut endpoints = [[Color32::default(); 2]; 3];
    for (i, code) in codes.iter().enumerate().take(endpoint_count) {
        let (subset, endpoint) = (i / 2, i % 2);
        let p = mode.pbit_slot(subset, endpoint).map(|slot| p_bits[slot]);
        let mut color = Color32::new(0, 0, 0, 255);
        for channel in 0..4 {
            let bits = mode.channel_bits(channel);
            if bits == 0 {
                continue;
            }
            color[channel] = match p {
                Some(p) => unquantize_with_pbit(code[channel], p, bits),
                None => unquantize(code[channel], bits),
            };
        }
        endpoints[subset][endpoint] = color;
    }

    let mut indices = [[0u8; 16]; 2];
    {
        let anchors = partition::anchors(mode.subsets(), shape as usize);
        let bit_count = mode.weight_bits as usize;
        for (pixel, index) in indices[0].iter_mut().enumerate() {
            let is_anchor = anchors.contains(&(pixel as u8));
            *index = reader.read_u8(bit_count - is_anchor as usize)?;
        }
    }
    if mode.is_dual_plane() {
        let bit_count = mode.secondary_weight_bits as usize;
        for (pixel, index) in indices[1].iter_mut().enumerate() {
            *index = reader.read_u8(bit_count - (pixel == 0) as usize)?;
        }
    }

    debug_assert_eq!(reader.position(), BLOCK_BITS);

    Ok(UnpackedBlock {
        mode: mode_id,
        shape,
        rotation,
        index_mode,
        endpoints,
        indices,
    })
}

/// Decodes a block to 16 row-major pixels.
///
/// Corrupt blocks decode to transparent black.
pub fn decode_block(block: &[u8; BLOCK_SIZE]) -> [Color32; 16] {
    match unpack_block(block) {
        Ok(unpacked) => unpacked.to_rgba(),
        Err(e) => {
            log::trace!("Substituting transparent black for corrupt block: {}", e);
            [Color32::TRANSPARENT_BLACK; 16]
        }
    }
}

/// Decodes a block to normalized `[0, 1]` channels.
pub fn decode_block_f32(block: &[u8; BLOCK_SIZE]) -> [[f32; 4]; 16] {
    decode_block(block).map(Color32::to_unorm)
}
