//! Partition shapes of the 2- and 3-region modes.
//!
//! Each row maps the 16 pixels of a block (row-major) to a region. The anchor
//! tables list, per region, the fix-up pixel whose index is stored with one
//! fewer bit. The anchor of region 0 is always pixel 0.

pub const MAX_REGIONS: usize = 3;
pub const SHAPE_COUNT: usize = 64;

static PARTITION_1: [u8; 16] = [0; 16];

/// Region of `pixel` in `shape` of the partition set with `regions` regions.
pub fn region_of(regions: usize, shape: usize, pixel: usize) -> u8 {
    partition(regions, shape)[pixel]
}

/// Fix-up pixel of `region` in `shape`.
pub fn fixup_pixel(regions: usize, shape: usize, region: usize) -> u8 {
    anchors(regions, shape)[region]
}

pub fn shape_count(regions: usize) -> usize {
    match regions {
        1 => 1,
        2 | 3 => SHAPE_COUNT,
        _ => unreachable!(),
    }
}

pub fn partition(regions: usize, shape: usize) -> &'static [u8; 16] {
    match regions {
        1 => &PARTITION_1,
        2 => &PARTITIONS_2[shape],
        3 => &PARTITIONS_3[shape],
        _ => unreachable!(),
    }
}

pub fn anchors(regions: usize, shape: usize) -> &'static [u8] {
    match regions {
        1 => &[0],
        2 => &ANCHORS_2[shape],
        3 => &ANCHORS_3[shape],
        _ => unreachable!(),
    }
}

/// Number of pixels in each region of a shape.
pub fn region_sizes(regions: usize, shape: usize) -> [usize; MAX_REGIONS] {
    let mut sizes = [0; MAX_REGIONS];
    for &region in partition(regions, shape) {
        sizes[region as usize] += 1;
    }
    sizes
}

#[rustfmt::skip]
static PARTITIONS_2: [[u8; 16]; SHAPE_COUNT] = [
    [ 0,0,1,1,0,0,1,1,0,0,1,1,0,0,1,1 ], [ 0,0,0,1,0,0,0,1,0,0,0,1,0,0,0,1 ],
    [ 0,1,1,1,0,1,1,1,0,1,1,1,0,1,1,1 ], [ 0,0,0,1,0,0,1,1,0,0,1,1,0,1,1,1 ],
    [ 0,0,0,0,0,0,0,1,0,0,0,1,0,0,1,1 ], [ 0,0,1,1,0,1,1,1,0,1,1,1,1,1,1,1 ],
    [ 0,0,0,1,0,0,1,1,0,1,1,1,1,1,1,1 ], [ 0,0,0,0,0,0,0,1,0,0,1,1,0,1,1,1 ],
    [ 0,0,0,0,0,0,0,0,0,0,0,1,0,0,1,1 ], [ 0,0,1,1,0,1,1,1,1,1,1,1,1,1,1,1 ],
    [ 0,0,0,0,0,0,0,1,0,1,1,1,1,1,1,1 ], [ 0,0,0,0,0,0,0,0,0,0,0,1,0,1,1,1 ],
    [ 0,0,0,1,0,1,1,1,1,1,1,1,1,1,1,1 ], [ 0,0,0,0,0,0,0,0,1,1,1,1,1,1,1,1 ],
    [ 0,0,0,0,1,1,1,1,1,1,1,1,1,1,1,1 ], [ 0,0,0,0,0,0,0,0,0,0,0,0,1,1,1,1 ],
    [ 0,0,0,0,1,0,0,0,1,1,1,0,1,1,1,1 ], [ 0,1,1,1,0,0,0,1,0,0,0,0,0,0,0,0 ],
    [ 0,0,0,0,0,0,0,0,1,0,0,0,1,1,1,0 ], [ 0,1,1,1,0,0,1,1,0,0,0,1,0,0,0,0 ],
    [ 0,0,1,1,0,0,0,1,0,0,0,0,0,0,0,0 ], [ 0,0,0,0,1,0,0,0,1,1,0,0,1,1,1,0 ],
    [ 0,0,0,0,0,0,0,0,1,0,0,0,1,1,0,0 ], [ 0,1,1,1,0,0,1,1,0,0,1,1,0,0,0,1 ],
    [ 0,0,1,1,0,0,0,1,0,0,0,1,0,0,0,0 ], [ 0,0,0,0,1,0,0,0,1,0,0,0,1,1,0,0 ],
    [ 0,1,1,0,0,1,1,0,0,1,1,0,0,1,1,0 ], [ 0,0,1,1,0,1,1,0,0,1,1,0,1,1,0,0 ],
    [ 0,0,0,1,0,1,1,1,1,1,1,0,1,0,0,0 ], [ 0,0,0,0,1,1,1,1,1,1,1,1,0,0,0,0 ],
    [ 0,1,1,1,0,0,0,1,1,0,0,0,1,1,1,0 ], [ 0,0,1,1,1,0,0,1,1,0,0,1,1,1,0,0 ],
    [ 0,1,0,1,0,1,0,1,0,1,0,1,0,1,0,1 ], [ 0,0,0,0,1,1,1,1,0,0,0,0,1,1,1,1 ],
    [ 0,1,0,1,1,0,1,0,0,1,0,1,1,0,1,0 ], [ 0,0,1,1,0,0,1,1,1,1,0,0,1,1,0,0 ],
    [ 0,0,1,1,1,1,0,0,0,0,1,1,1,1,0,0 ], [ 0,1,0,1,0,1,0,1,1,0,1,0,1,0,1,0 ],
    [ 0,1,1,0,1,0,0,1,0,1,1,0,1,0,0,1 ], [ 0,1,0,1,1,0,1,0,1,0,1,0,0,1,0,1 ],
    [ 0,1,1,1,0,0,1,1,1,1,0,0,1,1,1,0 ], [ 0,0,0,1,0,0,1,1,1,1,0,0,1,0,0,0 ],
    [ 0,0,1,1,0,0,1,0,0,1,0,0,1,1,0,0 ], [ 0,0,1,1,1,0,1,1,1,1,0,1,1,1,0,0 ],
    [ 0,1,1,0,1,0,0,1,1,0,0,1,0,1,1,0 ], [ 0,0,1,1,1,1,0,0,1,1,0,0,0,0,1,1 ],
    [ 0,1,1,0,0,1,1,0,1,0,0,1,1,0,0,1 ], [ 0,0,0,0,0,1,1,0,0,1,1,0,0,0,0,0 ],
    [ 0,1,0,0,1,1,1,0,0,1,0,0,0,0,0,0 ], [ 0,0,1,0,0,1,1,1,0,0,1,0,0,0,0,0 ],
    [ 0,0,0,0,0,0,1,0,0,1,1,1,0,0,1,0 ], [ 0,0,0,0,0,1,0,0,1,1,1,0,0,1,0,0 ],
    [ 0,1,1,0,1,1,0,0,1,0,0,1,0,0,1,1 ], [ 0,0,1,1,0,1,1,0,1,1,0,0,1,0,0,1 ],
    [ 0,1,1,0,0,0,1,1,1,0,0,1,1,1,0,0 ], [ 0,0,1,1,1,0,0,1,1,1,0,0,0,1,1,0 ],
    [ 0,1,1,0,1,1,0,0,1,1,0,0,1,0,0,1 ], [ 0,1,1,0,0,0,1,1,0,0,1,1,1,0,0,1 ],
    [ 0,1,1,1,1,1,1,0,1,0,0,0,0,0,0,1 ], [ 0,0,0,1,1,0,0,0,1,1,1,0,0,1,1,1 ],
    [ 0,0,0,0,1,1,1,1,0,0,1,1,0,0,1,1 ], [ 0,0,1,1,0,0,1,1,1,1,1,1,0,0,0,0 ],
    [ 0,0,1,0,0,0,1,0,1,1,1,0,1,1,1,0 ], [ 0,1,0,0,0,1,0,0,0,1,1,1,0,1,1,1 ],
];

#[rustfmt::skip]
static PARTITIONS_3: [[u8; 16]; SHAPE_COUNT] = [
    [ 0,0,1,1,0,0,1,1,0,2,2,1,2,2,2,2 ], [ 0,0,0,1,0,0,1,1,2,2,1,1,2,2,2,1 ],
    [ 0,0,0,0,2,0,0,1,2,2,1,1,2,2,1,1 ], [ 0,2,2,2,0,0,2,2,0,0,1,1,0,1,1,1 ],
    [ 0,0,0,0,0,0,0,0,1,1,2,2,1,1,2,2 ], [ 0,0,1,1,0,0,1,1,0,0,2,2,0,0,2,2 ],
    [ 0,0,2,2,0,0,2,2,1,1,1,1,1,1,1,1 ], [ 0,0,1,1,0,0,1,1,2,2,1,1,2,2,1,1 ],
    [ 0,0,0,0,0,0,0,0,1,1,1,1,2,2,2,2 ], [ 0,0,0,0,1,1,1,1,1,1,1,1,2,2,2,2 ],
    [ 0,0,0,0,1,1,1,1,2,2,2,2,2,2,2,2 ], [ 0,0,1,2,0,0,1,2,0,0,1,2,0,0,1,2 ],
    [ 0,1,1,2,0,1,1,2,0,1,1,2,0,1,1,2 ], [ 0,1,2,2,0,1,2,2,0,1,2,2,0,1,2,2 ],
    [ 0,0,1,1,0,1,1,2,1,1,2,2,1,2,2,2 ], [ 0,0,1,1,2,0,0,1,2,2,0,0,2,2,2,0 ],
    [ 0,0,0,1,0,0,1,1,0,1,1,2,1,1,2,2 ], [ 0,1,1,1,0,0,1,1,2,0,0,1,2,2,0,0 ],
    [ 0,0,0,0,1,1,2,2,1,1,2,2,1,1,2,2 ], [ 0,0,2,2,0,0,2,2,0,0,2,2,1,1,1,1 ],
    [ 0,1,1,1,0,1,1,1,0,2,2,2,0,2,2,2 ], [ 0,0,0,1,0,0,0,1,2,2,2,1,2,2,2,1 ],
    [ 0,0,0,0,0,0,1,1,0,1,2,2,0,1,2,2 ], [ 0,0,0,0,1,1,0,0,2,2,1,0,2,2,1,0 ],
    [ 0,1,2,2,0,1,2,2,0,0,1,1,0,0,0,0 ], [ 0,0,1,2,0,0,1,2,1,1,2,2,2,2,2,2 ],
    [ 0,1,1,0,1,2,2,1,1,2,2,1,0,1,1,0 ], [ 0,0,0,0,0,1,1,0,1,2,2,1,1,2,2,1 ],
    [ 0,0,2,2,1,1,0,2,1,1,0,2,0,0,2,2 ], [ 0,1,1,0,0,1,1,0,2,0,0,2,2,2,2,2 ],
    [ 0,0,1,1,0,1,2,2,0,1,2,2,0,0,1,1 ], [ 0,0,0,0,2,0,0,0,2,2,1,1,2,2,2,1 ],
    [ 0,0,0,0,0,0,0,2,1,1,2,2,1,2,2,2 ], [ 0,2,2,2,0,0,2,2,0,0,1,2,0,0,1,1 ],
    [ 0,0,1,1,0,0,1,2,0,0,2,2,0,2,2,2 ], [ 0,1,2,0,0,1,2,0,0,1,2,0,0,1,2,0 ],
    [ 0,0,0,0,1,1,1,1,2,2,2,2,0,0,0,0 ], [ 0,1,2,0,1,2,0,1,2,0,1,2,0,1,2,0 ],
    [ 0,1,2,0,2,0,1,2,1,2,0,1,0,1,2,0 ], [ 0,0,1,1,2,2,0,0,1,1,2,2,0,0,1,1 ],
    [ 0,0,1,1,1,1,2,2,2,2,0,0,0,0,1,1 ], [ 0,1,0,1,0,1,0,1,2,2,2,2,2,2,2,2 ],
    [ 0,0,0,0,0,0,0,0,2,1,2,1,2,1,2,1 ], [ 0,0,2,2,1,1,2,2,0,0,2,2,1,1,2,2 ],
    [ 0,0,2,2,0,0,1,1,0,0,2,2,0,0,1,1 ], [ 0,2,2,0,1,2,2,1,0,2,2,0,1,2,2,1 ],
    [ 0,1,0,1,2,2,2,2,2,2,2,2,0,1,0,1 ], [ 0,0,0,0,2,1,2,1,2,1,2,1,2,1,2,1 ],
    [ 0,1,0,1,0,1,0,1,0,1,0,1,2,2,2,2 ], [ 0,2,2,2,0,1,1,1,0,2,2,2,0,1,1,1 ],
    [ 0,0,0,2,1,1,1,2,0,0,0,2,1,1,1,2 ], [ 0,0,0,0,2,1,1,2,2,1,1,2,2,1,1,2 ],
    [ 0,2,2,2,0,1,1,1,0,1,1,1,0,2,2,2 ], [ 0,0,0,2,1,1,1,2,1,1,1,2,0,0,0,2 ],
    [ 0,1,1,0,0,1,1,0,0,1,1,0,2,2,2,2 ], [ 0,0,0,0,0,0,0,0,2,1,1,2,2,1,1,2 ],
    [ 0,1,1,0,0,1,1,0,2,2,2,2,2,2,2,2 ], [ 0,0,2,2,0,0,1,1,0,0,1,1,0,0,2,2 ],
    [ 0,0,2,2,1,1,2,2,1,1,2,2,0,0,2,2 ], [ 0,0,0,0,0,0,0,0,0,0,0,0,2,1,1,2 ],
    [ 0,0,0,2,0,0,0,1,0,0,0,2,0,0,0,1 ], [ 0,2,2,2,1,2,2,2,0,2,2,2,1,2,2,2 ],
    [ 0,1,0,1,2,2,2,2,2,2,2,2,2,2,2,2 ], [ 0,1,1,1,2,0,1,1,2,2,0,1,2,2,2,0 ],
];

#[rustfmt::skip]
static ANCHORS_2: [[u8; 2]; SHAPE_COUNT] = [
    [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15],
    [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0, 15],
    [0, 15], [0,  2], [0,  8], [0,  2], [0,  2], [0,  8], [0,  8], [0, 15],
    [0,  2], [0,  8], [0,  2], [0,  2], [0,  8], [0,  8], [0,  2], [0,  2],
    [0, 15], [0, 15], [0,  6], [0,  8], [0,  2], [0,  8], [0, 15], [0, 15],
    [0,  2], [0,  8], [0,  2], [0,  2], [0,  2], [0, 15], [0, 15], [0,  6],
    [0,  6], [0,  2], [0,  6], [0,  8], [0, 15], [0, 15], [0,  2], [0,  2],
    [0, 15], [0, 15], [0, 15], [0, 15], [0, 15], [0,  2], [0,  2], [0, 15],
];

#[rustfmt::skip]
static ANCHORS_3: [[u8; 3]; SHAPE_COUNT] = [
    [0,  3, 15], [0,  3,  8], [0, 15,  8], [0, 15,  3], [0,  8, 15], [0,  3, 15], [0, 15,  3], [0, 15,  8],
    [0,  8, 15], [0,  8, 15], [0,  6, 15], [0,  6, 15], [0,  6, 15], [0,  5, 15], [0,  3, 15], [0,  3,  8],
    [0,  3, 15], [0,  3,  8], [0,  8, 15], [0, 15,  3], [0,  3, 15], [0,  3,  8], [0,  6, 15], [0, 10,  8],
    [0,  5,  3], [0,  8, 15], [0,  8,  6], [0,  6, 10], [0,  8, 15], [0,  5, 15], [0, 15, 10], [0, 15,  8],
    [0,  8, 15], [0, 15,  3], [0,  3, 15], [0,  5, 10], [0,  6, 10], [0, 10,  8], [0,  8,  9], [0, 15, 10],
    [0, 15,  6], [0,  3, 15], [0, 15,  8], [0,  5, 15], [0, 15,  3], [0, 15,  6], [0, 15,  6], [0, 15,  8],
    [0,  3, 15], [0, 15,  3], [0,  5, 15], [0,  5, 15], [0,  5, 15], [0,  8, 15], [0,  5, 15], [0, 10, 15],
    [0,  5, 15], [0, 10, 15], [0,  8, 15], [0, 13, 15], [0, 15,  3], [0, 12, 15], [0,  3, 15], [0,  3,  8],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pixel_has_one_valid_region() {
        for regions in 1..=MAX_REGIONS {
            for shape in 0..shape_count(regions) {
                let mut seen = [false; MAX_REGIONS];
                for pixel in 0..16 {
                    let region = region_of(regions, shape, pixel) as usize;
                    assert!(region < regions, "regions: {}, shape: {}", regions, shape);
                    seen[region] = true;
                }
                // No region is empty
                assert!(
                    seen[..regions].iter().all(|&s| s),
                    "regions: {}, shape: {}",
                    regions,
                    shape
                );
            }
        }
    }

    #[test]
    fn test_fixup_pixels_belong_to_their_region() {
        for regions in 1..=MAX_REGIONS {
            for shape in 0..shape_count(regions) {
                assert_eq!(anchors(regions, shape).len(), regions);
                assert_eq!(fixup_pixel(regions, shape, 0), 0);
                for region in 0..regions {
                    let pixel = fixup_pixel(regions, shape, region) as usize;
                    assert_eq!(region_of(regions, shape, pixel) as usize, region);
                }
            }
        }
    }

    #[test]
    fn test_region_sizes_sum_to_block() {
        for regions in 1..=MAX_REGIONS {
            for shape in 0..shape_count(regions) {
                let sizes = region_sizes(regions, shape);
                assert_eq!(sizes.iter().sum::<usize>(), 16);
                assert!(sizes[..regions].iter().all(|&s| s > 0));
            }
        }
    }
}
