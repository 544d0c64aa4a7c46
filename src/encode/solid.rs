//! Solid-colour blocks.
//!
//! Every pixel uses one interpolation index, so each channel only needs an
//! endpoint pair whose interpolation at that index hits the target value. Equal
//! endpoints are used whenever they are exact.

use super::{block_error, emit::emit_block, Candidate, EncodeOptions};
use crate::color::{interpolate, quantize, unquantize, Color32, ALPHA_CHANNEL};

const MODE_5_INDEX: u8 = 1;
const MODE_6_INDEX: u8 = 5;

/// Stored endpoint pair for one channel, with its squared error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ChannelFit {
    lo: u8,
    hi: u8,
    error: u32,
}

impl ChannelFit {
    fn span(&self) -> u8 {
        self.lo.abs_diff(self.hi)
    }
}

/// Mode 6 pair for `value` when both endpoints carry P-bit `p`.
///
/// Values with the parity of `p` are exact with equal endpoints. Otherwise the
/// endpoints sit one below and one above: with a weight of 21/64 the
/// interpolation of `v - 1` and `v + 1` rounds to `v`.
fn mode_6_channel(value: u8, p: u8) -> ChannelFit {
    if value & 1 == p {
        let code = value >> 1;
        return ChannelFit {
            lo: code,
            hi: code,
            error: 0,
        };
    }
    match value {
        1..=254 => {
            let lo = (value - 1) >> 1;
            ChannelFit {
                lo,
                hi: lo + 1,
                error: 0,
            }
        }
        // 0 with P-bit 1 or 255 with P-bit 0 is off by one
        _ => {
            let code = value >> 1;
            ChannelFit {
                lo: code,
                hi: code,
                error: 1,
            }
        }
    }
}

/// Mode 5 colour pair for `value` at index 1 of the 2-bit palette.
fn mode_5_channel(value: u8) -> ChannelFit {
    let code = quantize(value, 7);
    let expanded = unquantize(code, 7);
    if expanded == value {
        return ChannelFit {
            lo: code,
            hi: code,
            error: 0,
        };
    }

    let mut best = ChannelFit {
        lo: code,
        hi: code,
        error: (expanded as i32 - value as i32).pow(2) as u32,
    };
    for lo in 0..128u8 {
        for hi in 0..128u8 {
            let decoded = interpolate(unquantize(lo, 7), unquantize(hi, 7), MODE_5_INDEX, 2);
            let fit = ChannelFit {
                lo,
                hi,
                error: (decoded as i32 - value as i32).pow(2) as u32,
            };
            if fit.error < best.error || (fit.error == best.error && fit.span() < best.span()) {
                best = fit;
            }
        }
    }
    best
}

fn mode_6_candidate(color: Color32) -> Candidate {
    let fits = [0u8, 1].map(|p| color.0.map(|value| mode_6_channel(value, p)));
    let error = |p: usize| fits[p].iter().map(|f| f.error).sum::<u32>();
    let spread = |p: usize| fits[p].iter().map(|f| f.span() as u32).sum::<u32>();
    let p = if (error(1), spread(1)) < (error(0), spread(0)) { 1 } else { 0 };

    let mut candidate = Candidate {
        mode: 6,
        p_bits: [[p as u8; 2], [0; 2], [0; 2]],
        indices: [[MODE_6_INDEX; 16], [0; 16]],
        ..Default::default()
    };
    for (channel, fit) in fits[p].iter().enumerate() {
        candidate.endpoints[0][0][channel] = fit.lo;
        candidate.endpoints[0][1][channel] = fit.hi;
    }
    candidate
}

fn mode_5_candidate(color: Color32) -> Candidate {
    let mut candidate = Candidate {
        mode: 5,
        indices: [[MODE_5_INDEX; 16], [0; 16]],
        ..Default::default()
    };
    for channel in 0..3 {
        let fit = mode_5_channel(color[channel]);
        candidate.endpoints[0][0][channel] = fit.lo;
        candidate.endpoints[0][1][channel] = fit.hi;
    }
    // 8-bit alpha is exact on its own plane
    candidate.endpoints[0][0][ALPHA_CHANNEL] = color[ALPHA_CHANNEL];
    candidate.endpoints[0][1][ALPHA_CHANNEL] = color[ALPHA_CHANNEL];
    candidate
}

/// Encodes a block whose pixels are all equal, or returns `None`.
///
/// Mode 6 is always tried, mode 5 unless `options.fast` is set. Mode 5 only
/// replaces mode 6 when it is strictly better.
pub(crate) fn encode_solid(pixels: &[Color32; 16], options: &EncodeOptions) -> Option<Candidate> {
    let color = pixels[0];
    if pixels.iter().any(|&p| p != color) {
        return None;
    }

    let mut best = mode_6_candidate(color);
    best.error = block_error(&emit_block(&best), pixels);

    if best.error > 0 && !options.fast {
        let mut candidate = mode_5_candidate(color);
        candidate.error = block_error(&emit_block(&candidate), pixels);
        if candidate.error < best.error {
            best = candidate;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::unquantize_with_pbit, decode::decode_block};

    #[test]
    fn test_mode_6_channel_is_exact_inside_the_range() {
        for value in 0..=255u8 {
            for p in 0..2u8 {
                let fit = mode_6_channel(value, p);
                let decoded = interpolate(
                    unquantize_with_pbit(fit.lo, p, 7),
                    unquantize_with_pbit(fit.hi, p, 7),
                    MODE_6_INDEX,
                    4,
                );
                let error = (decoded as i32 - value as i32).pow(2) as u32;
                assert_eq!(error, fit.error, "value {} p {}", value, p);
                let expected = ((value == 0 && p == 1) || (value == 255 && p == 0)) as u32;
                assert_eq!(fit.error, expected, "value {} p {}", value, p);
            }
        }
    }

    #[test]
    fn test_mode_5_channel_is_exact() {
        for value in 0..=255u8 {
            let fit = mode_5_channel(value);
            let decoded =
                interpolate(unquantize(fit.lo, 7), unquantize(fit.hi, 7), MODE_5_INDEX, 2);
            assert_eq!(decoded, value, "value {}", value);
            assert_eq!(fit.error, 0);
        }
    }

    #[test]
    fn test_mid_gray() {
        let pixels = [Color32::new(128, 128, 128, 255); 16];
        let candidate = encode_solid(&pixels, &EncodeOptions::default()).unwrap();
        assert_eq!(candidate.mode, 6);
        assert_eq!(candidate.error, 0);
        assert_eq!(candidate.p_bits[0], [1, 1]);
        assert_eq!(decode_block(&emit_block(&candidate)), pixels);
    }

    #[test]
    fn test_equal_endpoints_when_exact() {
        let pixels = [Color32::new(254, 254, 254, 254); 16];
        let candidate = encode_solid(&pixels, &EncodeOptions::default()).unwrap();
        assert_eq!(candidate.mode, 6);
        assert_eq!(candidate.endpoints[0][0], candidate.endpoints[0][1]);
        assert_eq!(candidate.error, 0);
    }

    #[test]
    fn test_opaque_black_falls_back_to_mode_5() {
        let pixels = [Color32::new(0, 0, 0, 255); 16];
        let candidate = encode_solid(&pixels, &EncodeOptions::default()).unwrap();
        assert_eq!(candidate.mode, 5);
        assert_eq!(candidate.error, 0);

        let fast = encode_solid(&pixels, &EncodeOptions::FAST).unwrap();
        assert_eq!(fast.mode, 6);
        // Alpha decodes to 254 on every pixel
        assert_eq!(fast.error, 16);
    }

    #[test]
    fn test_not_solid() {
        let mut pixels = [Color32::new(1, 2, 3, 4); 16];
        pixels[9] = Color32::new(1, 2, 3, 5);
        assert_eq!(encode_solid(&pixels, &EncodeOptions::default()), None);
    }
}
