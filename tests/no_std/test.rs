#![no_std]

pub fn decode(block: &[u8; 16]) -> [bc7::Color32; 16] {
    bc7::decode_block(block)
}
