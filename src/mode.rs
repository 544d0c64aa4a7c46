use crate::partition;

/// How the P-bits of a mode are shared between endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PBits {
    None,
    /// One P-bit per region, shared by both of its endpoints.
    Shared,
    /// One P-bit per endpoint.
    Unique,
}

/// Static layout of one BC7 mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bc7Mode {
    pub id: u8,
    pub subset_count: u8,
    pub pat_bits: u8,
    pub rotation_bits: u8,
    pub index_mode_bits: u8,
    pub color_bits: u8,
    pub alpha_bits: u8,
    pub p_bits: PBits,
    pub weight_bits: u8,
    /// Index precision of the second plane, 0 for single-plane modes.
    pub secondary_weight_bits: u8,
}

#[rustfmt::skip]
pub static BC7_MODES: [Bc7Mode; 8] = [
    Bc7Mode { id: 0, subset_count: 3, pat_bits: 4, rotation_bits: 0, index_mode_bits: 0, color_bits: 4, alpha_bits: 0, p_bits: PBits::Unique, weight_bits: 3, secondary_weight_bits: 0 },
    Bc7Mode { id: 1, subset_count: 2, pat_bits: 6, rotation_bits: 0, index_mode_bits: 0, color_bits: 6, alpha_bits: 0, p_bits: PBits::Shared, weight_bits: 3, secondary_weight_bits: 0 },
    Bc7Mode { id: 2, subset_count: 3, pat_bits: 6, rotation_bits: 0, index_mode_bits: 0, color_bits: 5, alpha_bits: 0, p_bits: PBits::None,   weight_bits: 2, secondary_weight_bits: 0 },
    Bc7Mode { id: 3, subset_count: 2, pat_bits: 6, rotation_bits: 0, index_mode_bits: 0, color_bits: 7, alpha_bits: 0, p_bits: PBits::Unique, weight_bits: 2, secondary_weight_bits: 0 },
    Bc7Mode { id: 4, subset_count: 1, pat_bits: 0, rotation_bits: 2, index_mode_bits: 1, color_bits: 5, alpha_bits: 6, p_bits: PBits::None,   weight_bits: 2, secondary_weight_bits: 3 },
    Bc7Mode { id: 5, subset_count: 1, pat_bits: 0, rotation_bits: 2, index_mode_bits: 0, color_bits: 7, alpha_bits: 8, p_bits: PBits::None,   weight_bits: 2, secondary_weight_bits: 2 },
    Bc7Mode { id: 6, subset_count: 1, pat_bits: 0, rotation_bits: 0, index_mode_bits: 0, color_bits: 7, alpha_bits: 7, p_bits: PBits::Unique, weight_bits: 4, secondary_weight_bits: 0 },
    Bc7Mode { id: 7, subset_count: 2, pat_bits: 6, rotation_bits: 0, index_mode_bits: 0, color_bits: 5, alpha_bits: 5, p_bits: PBits::Unique, weight_bits: 2, secondary_weight_bits: 0 },
];

impl Bc7Mode {
    pub fn subsets(&self) -> usize {
        self.subset_count as usize
    }

    pub fn plane_count(&self) -> usize {
        if self.secondary_weight_bits > 0 {
            2
        } else {
            1
        }
    }

    pub fn is_dual_plane(&self) -> bool {
        self.plane_count() == 2
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha_bits > 0
    }

    pub fn endpoint_count(&self) -> usize {
        2 * self.subsets()
    }

    /// Shapes the mode can address. Mode 0 only reaches the first 16 of the
    /// 3-region set.
    pub fn shape_count(&self) -> usize {
        partition::shape_count(self.subsets()).min(1 << self.pat_bits)
    }

    pub fn rotation_count(&self) -> u8 {
        1 << self.rotation_bits
    }

    pub fn index_mode_count(&self) -> u8 {
        1 << self.index_mode_bits
    }

    pub fn pbit_count(&self) -> usize {
        match self.p_bits {
            PBits::None => 0,
            PBits::Shared => self.subsets(),
            PBits::Unique => self.endpoint_count(),
        }
    }

    /// Slot in the P-bit list used by `endpoint` of `subset`.
    pub fn pbit_slot(&self, subset: usize, endpoint: usize) -> Option<usize> {
        match self.p_bits {
            PBits::None => None,
            PBits::Shared => Some(subset),
            PBits::Unique => Some(subset * 2 + endpoint),
        }
    }

    /// Stored bits of an endpoint channel, P-bit excluded.
    pub fn channel_bits(&self, channel: usize) -> u8 {
        if channel == crate::color::ALPHA_CHANNEL {
            self.alpha_bits
        } else {
            self.color_bits
        }
    }

    /// Precision of an endpoint channel once the P-bit is folded in.
    pub fn channel_precision(&self, channel: usize) -> u8 {
        let bits = self.channel_bits(channel);
        if bits > 0 && self.p_bits != PBits::None {
            bits + 1
        } else {
            bits
        }
    }

    pub fn color_precision(&self) -> u8 {
        self.channel_precision(0)
    }

    pub fn alpha_precision(&self) -> u8 {
        self.channel_precision(crate::color::ALPHA_CHANNEL)
    }

    /// Index precision of the colour and alpha interpolation for `index_mode`.
    ///
    /// Returns `(color_plane, color_bits, alpha_plane, alpha_bits)`.
    pub fn plane_layout(&self, index_mode: u8) -> (usize, u8, usize, u8) {
        if !self.is_dual_plane() {
            (0, self.weight_bits, 0, self.weight_bits)
        } else if index_mode == 0 {
            (0, self.weight_bits, 1, self.secondary_weight_bits)
        } else {
            (1, self.secondary_weight_bits, 0, self.weight_bits)
        }
    }

    pub fn plane_bits(&self, plane: usize) -> u8 {
        if plane == 0 {
            self.weight_bits
        } else {
            self.secondary_weight_bits
        }
    }

    pub fn total_bits(&self) -> usize {
        let header = self.id as usize
            + 1
            + self.pat_bits as usize
            + self.rotation_bits as usize
            + self.index_mode_bits as usize;
        let endpoints =
            self.endpoint_count() * (3 * self.color_bits as usize + self.alpha_bits as usize);
        // Every region's fix-up index drops a bit, and so does pixel 0 of the
        // second plane
        let primary = 16 * self.weight_bits as usize - self.subsets();
        let secondary = if self.is_dual_plane() {
            16 * self.secondary_weight_bits as usize - 1
        } else {
            0
        };
        header + endpoints + self.pbit_count() + primary + secondary
    }
}
