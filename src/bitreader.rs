use byteorder::{ByteOrder, LE};

use crate::{error::BlockError, BLOCK_BITS, BLOCK_SIZE};

/// LSB-first reader over a single 128-bit block.
///
/// Reads never go past the end of the block: a read that would cross bit 127
/// fails with [`BlockError::Overrun`] and leaves the position untouched.
pub struct BitReaderLsb {
    bits: u128,
    pos: usize,
}

impl BitReaderLsb {
    pub fn new(block: &[u8; BLOCK_SIZE]) -> Self {
        Self {
            bits: LE::read_u128(block),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        BLOCK_BITS - self.pos
    }

    pub fn read_bool(&mut self) -> Result<bool, BlockError> {
        Ok(self.read_u8(1)? == 1)
    }

    pub fn read_u8(&mut self, count: usize) -> Result<u8, BlockError> {
        assert!(count <= 8);
        Ok(self.read(count)? as u8)
    }

    pub fn read(&mut self, count: usize) -> Result<u32, BlockError> {
        assert!(count <= 32);
        if count > self.remaining() {
            return Err(BlockError::Overrun {
                pos: self.pos,
                count,
            });
        }
        if count == 0 {
            return Ok(0);
        }
        let value = (self.bits >> self.pos) as u32 & mask!(count as u32);
        self.pos += count;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitreader_lsb() {
        let pattern = 0x5555_5555_5555_5555_0123_4567_89AB_CDEFu128;
        let bytes = pattern.to_le_bytes();

        // Reading two fields back to back returns the matching slices of the block
        for offset in 0..32 {
            for len in 0..32 {
                let mut reader = BitReaderLsb::new(&bytes);
                let first = reader.read(offset).unwrap();
                let second = reader.read(len).unwrap();

                let expected_first = (pattern & mask!(offset as u128)) as u32;
                let expected_second = ((pattern >> offset) & mask!(len as u128)) as u32;

                assert_eq!(first, expected_first, "off: {}, len: {}", offset, len);
                assert_eq!(second, expected_second, "off: {}, len: {}", offset, len);
                assert_eq!(reader.position(), offset + len);
            }
        }
    }

    #[test]
    fn test_bitreader_overrun() {
        let bytes = [0xFF; BLOCK_SIZE];
        let mut reader = BitReaderLsb::new(&bytes);
        for _ in 0..16 {
            assert_eq!(reader.read_u8(8), Ok(0xFF));
        }
        assert_eq!(reader.remaining(), 0);
        assert_eq!(
            reader.read_bool(),
            Err(BlockError::Overrun { pos: 128, count: 1 })
        );
        assert_eq!(reader.position(), 128);
    }

    #[test]
    fn test_bitreader_partial_overrun_keeps_position() {
        let bytes = [0xA5; BLOCK_SIZE];
        let mut reader = BitReaderLsb::new(&bytes);
        reader.read(30).unwrap();
        reader.read(30).unwrap();
        reader.read(30).unwrap();
        reader.read(30).unwrap();
        assert_eq!(reader.position(), 120);
        assert!(reader.read_u8(8).is_ok());
        assert!(reader.read_u8(1).is_err());
    }
}
