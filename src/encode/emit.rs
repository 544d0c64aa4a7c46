use super::Candidate;
use crate::{
    bitwriter::BitWriterLsb,
    color::{quantize, unquantize, unquantize_with_pbit, Color32},
    mode::{Bc7Mode, PBits, BC7_MODES},
    partition, BLOCK_SIZE,
};

/// Closest stored code to `value`, with its squared error once expanded.
pub(crate) fn nearest_code(value: u8, bits: u8, p_bit: Option<u8>) -> (u8, u32) {
    let max_code = ((1u32 << bits) - 1) as i32;
    let guess = match p_bit {
        Some(_) => quantize(value, bits + 1) >> 1,
        None => quantize(value, bits),
    } as i32;

    let mut best = (0, u32::MAX);
    for code in (guess - 1).max(0)..=(guess + 1).min(max_code) {
        let expanded = match p_bit {
            Some(p) => unquantize_with_pbit(code as u8, p, bits),
            None => unquantize(code as u8, bits),
        };
        let diff = expanded as i32 - value as i32;
        let error = (diff * diff) as u32;
        if error < best.1 {
            best = (code as u8, error);
        }
    }
    best
}

/// Picks the P-bit for a group of 8-bit values sharing it.
///
/// Every value votes for the P-bit that expands closer to it. Ties are broken by
/// the total error of each choice, then in favour of 0.
fn vote_p_bit(values: &[u8], bits: u8) -> u8 {
    let mut votes = [0u32; 2];
    let mut totals = [0u32; 2];
    for &value in values {
        let e0 = nearest_code(value, bits, Some(0)).1;
        let e1 = nearest_code(value, bits, Some(1)).1;
        totals[0] += e0;
        totals[1] += e1;
        if e0 < e1 {
            votes[0] += 1;
        } else if e1 < e0 {
            votes[1] += 1;
        }
    }
    if votes[1] > votes[0] || (votes[1] == votes[0] && totals[1] < totals[0]) {
        1
    } else {
        0
    }
}

/// Quantizes an 8-bit endpoint pair to the stored codes and P-bits of `mode`.
pub(crate) fn quantize_endpoints(
    mode: &Bc7Mode,
    endpoints: &[Color32; 2],
) -> ([Color32; 2], [u8; 2]) {
    let channels: &[usize] = if mode.has_alpha() { &[0, 1, 2, 3] } else { &[0, 1, 2] };

    let mut group = [0u8; 8];
    let p_bits = match mode.p_bits {
        PBits::None => [0, 0],
        PBits::Unique => {
            let mut p_bits = [0; 2];
            for (p, endpoint) in p_bits.iter_mut().zip(endpoints.iter()) {
                for (slot, &channel) in group.iter_mut().zip(channels) {
                    *slot = endpoint[channel];
                }
                *p = vote_p_bit(&group[..channels.len()], mode.color_bits);
            }
            p_bits
        }
        PBits::Shared => {
            let mut len = 0;
            for endpoint in endpoints.iter() {
                for &channel in channels {
                    group[len] = endpoint[channel];
                    len += 1;
                }
            }
            let p = vote_p_bit(&group[..len], mode.color_bits);
            [p, p]
        }
    };

    let mut codes = [Color32::default(); 2];
    for (endpoint, (code, &p)) in codes.iter_mut().zip(p_bits.iter()).enumerate() {
        for &channel in channels {
            let p_bit = (mode.p_bits != PBits::None).then_some(p);
            code[channel] =
                nearest_code(endpoints[endpoint][channel], mode.channel_bits(channel), p_bit).0;
        }
    }
    (codes, p_bits)
}

/// Writes a candidate in the mode's bit layout.
pub(crate) fn emit_block(candidate: &Candidate) -> [u8; BLOCK_SIZE] {
    let mode = &BC7_MODES[candidate.mode as usize];
    let subsets = mode.subsets();
    let mut writer = BitWriterLsb::new();

    writer.write_u8(mode.id as usize + 1, 1 << mode.id);
    writer.write_u8(mode.pat_bits as usize, candidate.shape);
    writer.write_u8(mode.rotation_bits as usize, candidate.rotation);
    writer.write_u8(mode.index_mode_bits as usize, candidate.index_mode);

    for channel in 0..4 {
        let bit_count = mode.channel_bits(channel) as usize;
        for endpoints in candidate.endpoints.iter().take(subsets) {
            writer.write_u8(bit_count, endpoints[0][channel]);
            writer.write_u8(bit_count, endpoints[1][channel]);
        }
    }

    for slot in 0..mode.pbit_count() {
        let p = match mode.p_bits {
            PBits::Shared => candidate.p_bits[slot][0],
            _ => candidate.p_bits[slot / 2][slot % 2],
        };
        writer.write_bool(p == 1);
    }

    {
        let anchors = partition::anchors(subsets, candidate.shape as usize);
        let bit_count = mode.weight_bits as usize;
        for (pixel, &index) in candidate.indices[0].iter().enumerate() {
            let is_anchor = anchors.contains(&(pixel as u8));
            debug_assert!(!is_anchor || index >> (bit_count - 1) == 0);
            writer.write_u8(bit_count - is_anchor as usize, index);
        }
    }
    if mode.is_dual_plane() {
        let bit_count = mode.secondary_weight_bits as usize;
        for (pixel, &index) in candidate.indices[1].iter().enumerate() {
            writer.write_u8(bit_count - (pixel == 0) as usize, index);
        }
    }

    writer.finish()
}
