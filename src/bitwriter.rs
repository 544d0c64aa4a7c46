use byteorder::{ByteOrder, LE};

use crate::{BLOCK_BITS, BLOCK_SIZE};

/// LSB-first writer filling a single 128-bit block.
pub struct BitWriterLsb {
    bits: u128,
    bit_pos: usize,
}

impl BitWriterLsb {
    pub fn new() -> Self {
        Self {
            bits: 0,
            bit_pos: 0,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.bit_pos
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_u32(1, v as u32)
    }

    pub fn write_u8(&mut self, count: usize, v: u8) {
        assert!(count <= 8);
        self.write_u32(count, v as u32)
    }

    pub fn write_u32(&mut self, count: usize, v: u32) {
        assert!(count <= 32);
        debug_assert!(
            self.bit_pos + count <= BLOCK_BITS,
            "write of {} bits at {} overflows the block",
            count,
            self.bit_pos
        );
        if count == 0 || self.bit_pos >= BLOCK_BITS {
            self.bit_pos += count;
            return;
        }
        let v = (v & mask!(count as u32)) as u128;
        self.bits |= v << self.bit_pos;
        self.bit_pos += count;
    }

    pub fn finish(self) -> [u8; BLOCK_SIZE] {
        debug_assert_eq!(self.bit_pos, BLOCK_BITS, "block is not fully written");
        let mut output = [0; BLOCK_SIZE];
        LE::write_u128(&mut output, self.bits);
        output
    }
}

impl Default for BitWriterLsb {
    fn default() -> Self {
        Self::new()
    }
}
