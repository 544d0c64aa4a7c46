use glam::Vec4;

use super::{emit::quantize_endpoints, indices::decode_endpoints, Candidate, EncodeContext, Region};
use crate::color::{from_hdr, interpolate_color, to_hdr, Color32, ColorF32};

const POWER_ITERATIONS: usize = 8;

const RGB: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);

/// Fits a line through `points` and returns its extent along the principal axis.
///
/// Only the channels selected by `mask` take part; the others come out as zero.
pub(crate) fn fit_line(points: &[ColorF32], mask: Vec4) -> [ColorF32; 2] {
    match points {
        [] => [Vec4::ZERO; 2],
        [p] => [*p * mask; 2],
        [p0, p1] => [*p0 * mask, *p1 * mask],
        _ => principal_axis_fit(points, mask),
    }
}

fn principal_axis_fit(points: &[ColorF32], mask: Vec4) -> [ColorF32; 2] {
    let n = points.len() as f32;
    let mean = points.iter().fold(Vec4::ZERO, |acc, &p| acc + p * mask) / n;

    let mut covariance = [[0.0f32; 4]; 4];
    for &p in points {
        let d = (p * mask - mean).to_array();
        for (row, &di) in covariance.iter_mut().zip(d.iter()) {
            for (c, &dj) in row.iter_mut().zip(d.iter()) {
                *c += di * dj;
            }
        }
    }

    // Start from the column of the channel with the widest spread
    let widest = (0..4)
        .max_by(|&a, &b| covariance[a][a].total_cmp(&covariance[b][b]))
        .unwrap_or(0);
    let mut axis = Vec4::from_array(covariance[widest]);

    for _ in 0..POWER_ITERATIONS {
        let length = axis.length();
        if length < 1e-6 {
            break;
        }
        axis /= length;
        axis = Vec4::new(
            Vec4::from_array(covariance[0]).dot(axis),
            Vec4::from_array(covariance[1]).dot(axis),
            Vec4::from_array(covariance[2]).dot(axis),
            Vec4::from_array(covariance[3]).dot(axis),
        );
    }

    let length = axis.length();
    if !length.is_finite() || length < 1e-6 {
        return [mean; 2];
    }
    let axis = axis / length;

    let (mut t_min, mut t_max) = (f32::MAX, f32::MIN);
    for &p in points {
        let t = (p * mask - mean).dot(axis);
        t_min = t_min.min(t);
        t_max = t_max.max(t);
    }
    [mean + axis * t_min, mean + axis * t_max]
}

/// Unquantized endpoints for the pixels of one region, before quantization.
fn region_endpoints(ctx: &EncodeContext, points: &[ColorF32]) -> [Color32; 2] {
    let mode = ctx.mode;
    let mut line = if mode.is_dual_plane() || !mode.has_alpha() {
        fit_line(points, RGB)
    } else {
        fit_line(points, Vec4::ONE)
    };

    if mode.is_dual_plane() {
        let (lo, hi) = points.iter().fold((f32::MAX, f32::MIN), |(lo, hi), p| {
            (lo.min(p.w), hi.max(p.w))
        });
        line[0].w = lo;
        line[1].w = hi;
    } else if !mode.has_alpha() {
        line[0].w = 255.0;
        line[1].w = 255.0;
    }

    [from_hdr(line[0]), from_hdr(line[1])]
}

fn palette_index(t: f32, bits: u8) -> u8 {
    let max = ((1u32 << bits) - 1) as f32;
    (t * max).round().clamp(0.0, max) as u8
}

fn project(pixel: ColorF32, e0: ColorF32, e1: ColorF32, mask: Vec4) -> f32 {
    let dir = (e1 - e0) * mask;
    let length_squared = dir.length_squared();
    if length_squared > 0.0 {
        (pixel - e0).dot(dir) / length_squared
    } else {
        0.0
    }
}

/// Error of a region when each pixel takes the index of its projection onto
/// the decoded endpoint line.
fn projection_error(
    ctx: &EncodeContext,
    region: &Region,
    codes: &[Color32; 2],
    p_bits: [u8; 2],
) -> u32 {
    let [e0, e1] = decode_endpoints(ctx.mode, codes, p_bits);
    let (h0, h1) = (to_hdr(e0), to_hdr(e1));
    let (_, color_bits, _, alpha_bits) = ctx.plane_layout();

    let mut error = 0;
    for &pixel in region.pixels() {
        let pixel = ctx.pixels[pixel as usize];
        let p = to_hdr(pixel);
        let (color_index, alpha_index) = if ctx.mode.is_dual_plane() {
            (
                palette_index(project(p, h0, h1, RGB), color_bits),
                palette_index(project(p, h0, h1, Vec4::W), alpha_bits),
            )
        } else {
            let index = palette_index(project(p, h0, h1, Vec4::ONE), color_bits);
            (index, index)
        };
        let decoded = interpolate_color(e0, e1, color_index, color_bits, alpha_index, alpha_bits);
        error += decoded.squared_error(pixel, 4);
    }
    error
}

/// Cheap estimate of a shape: line-fit endpoints, quantized, scored by
/// projection indices.
pub(crate) fn estimate_shape(ctx: &EncodeContext, shape: usize) -> Candidate {
    let regions = ctx.mode.subsets();
    let mut candidate = ctx.candidate(shape);
    candidate.error = 0;

    for region in 0..regions {
        let pixels = Region::of(regions, shape, region);
        let mut points = [Vec4::ZERO; 16];
        for (point, &pixel) in points.iter_mut().zip(pixels.pixels()) {
            *point = to_hdr(ctx.pixels[pixel as usize]);
        }
        let points = &points[..pixels.pixels().len()];

        let endpoints = region_endpoints(ctx, points);
        let (codes, p_bits) = quantize_endpoints(ctx.mode, &endpoints);
        candidate.endpoints[region] = codes;
        candidate.p_bits[region] = p_bits;
        candidate.error += projection_error(ctx, &pixels, &codes, p_bits);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::BC7_MODES;

    #[test]
    fn test_fit_line_degenerate_regions() {
        let a = Vec4::new(10.0, 20.0, 30.0, 40.0);
        let b = Vec4::new(50.0, 60.0, 70.0, 80.0);
        assert_eq!(fit_line(&[a], Vec4::ONE), [a, a]);
        assert_eq!(fit_line(&[a, b], Vec4::ONE), [a, b]);
        assert_eq!(fit_line(&[a, a, a, a], Vec4::ONE), [a, a]);
        let rgb = fit_line(&[a], RGB);
        assert_eq!(rgb[0].w, 0.0);
    }

    #[test]
    fn test_fit_line_recovers_extremes() {
        let lo = Vec4::new(0.0, 255.0, 40.0, 255.0);
        let hi = Vec4::new(255.0, 0.0, 40.0, 255.0);
        let points: Vec<Vec4> = (0..16).map(|i| lo.lerp(hi, i as f32 / 15.0)).collect();
        let [e0, e1] = fit_line(&points, Vec4::ONE);
        let (e0, e1) = if e0.x < e1.x { (e0, e1) } else { (e1, e0) };
        assert!((e0 - lo).abs().max_element() < 0.01, "{:?}", e0);
        assert!((e1 - hi).abs().max_element() < 0.01, "{:?}", e1);
    }

    #[test]
    fn test_estimate_solid_region_is_lossless() {
        let pixels = [Color32::new(255, 0, 0, 255); 16];
        let ctx = EncodeContext::new(&BC7_MODES[4], 0, 0, &pixels);
        let candidate = estimate_shape(&ctx, 0);
        assert_eq!(candidate.error, 0);
    }

    #[test]
    fn test_estimate_never_beats_exhaustive_assignment() {
        let mut pixels = [Color32::default(); 16];
        for (i, p) in pixels.iter_mut().enumerate() {
            *p = Color32::new((i * 16) as u8, (i * 7) as u8, 200 - (i * 9) as u8, 255);
        }
        for &mode in [0usize, 1, 3, 6].iter() {
            let ctx = EncodeContext::new(&BC7_MODES[mode], 0, 0, &pixels);
            for shape in 0..ctx.mode.shape_count() {
                let rough = estimate_shape(&ctx, shape);
                let mut exact = rough;
                let error = crate::encode::indices::assign_indices(&ctx, &mut exact);
                assert!(error <= rough.error, "mode {} shape {}", mode, shape);
            }
        }
    }
}
