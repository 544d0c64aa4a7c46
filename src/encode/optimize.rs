use super::{indices::region_error, EncodeContext, Region};
use crate::color::Color32;

/// Upper bound on descent passes over both endpoints of a channel.
const MAX_PASSES: usize = 8;
const SCAN_RADIUS: i32 = 5;

/// Improves the stored endpoint codes of one region, one channel at a time.
///
/// Each channel first gets a coordinate descent with doubling steps on either
/// endpoint, then an exhaustive scan of the neighbourhood of both endpoints.
/// P-bits stay fixed. Only strictly better codes are accepted, so the returned
/// error never exceeds the starting one.
pub(crate) fn optimize_region(
    ctx: &EncodeContext,
    region: &Region,
    codes: &mut [Color32; 2],
    p_bits: [u8; 2],
) -> u32 {
    let mut best = region_error(ctx, region, codes, p_bits);

    for channel in 0..4 {
        if best == 0 {
            break;
        }
        let bits = ctx.mode.channel_bits(channel);
        if bits == 0 {
            continue;
        }
        let max_code = ((1u32 << bits) - 1) as i32;
        best = descend(ctx, region, codes, p_bits, channel, max_code, best);
        if best > 0 {
            best = scan(ctx, region, codes, p_bits, channel, max_code, best);
        }
    }
    best
}

fn descend(
    ctx: &EncodeContext,
    region: &Region,
    codes: &mut [Color32; 2],
    p_bits: [u8; 2],
    channel: usize,
    max_code: i32,
    mut best: u32,
) -> u32 {
    for _ in 0..MAX_PASSES {
        let mut improved = false;
        for endpoint in 0..2 {
            let mut step = 1;
            while step <= max_code {
                for &delta in [step, -step].iter() {
                    let code = codes[endpoint][channel] as i32 + delta;
                    if !(0..=max_code).contains(&code) {
                        continue;
                    }
                    let mut trial = *codes;
                    trial[endpoint][channel] = code as u8;
                    let error = region_error(ctx, region, &trial, p_bits);
                    if error < best {
                        best = error;
                        *codes = trial;
                        improved = true;
                    }
                }
                step *= 2;
            }
        }
        if !improved || best == 0 {
            break;
        }
    }
    best
}

fn scan(
    ctx: &EncodeContext,
    region: &Region,
    codes: &mut [Color32; 2],
    p_bits: [u8; 2],
    channel: usize,
    max_code: i32,
    mut best: u32,
) -> u32 {
    let center = *codes;
    let c0 = center[0][channel] as i32;
    let c1 = center[1][channel] as i32;

    for code0 in (c0 - SCAN_RADIUS).max(0)..=(c0 + SCAN_RADIUS).min(max_code) {
        for code1 in (c1 - SCAN_RADIUS).max(0)..=(c1 + SCAN_RADIUS).min(max_code) {
            let mut trial = center;
            trial[0][channel] = code0 as u8;
            trial[1][channel] = code1 as u8;
            let error = region_error(ctx, region, &trial, p_bits);
            if error < best {
                best = error;
                *codes = trial;
            }
        }
    }
    best
}
