//! Integer luma and sepia weights.
//!
//! Weights are held as integers over a fixed scale so the weighted sum is
//! exact. That keeps the high-contrast threshold and the neutral-tone output
//! free of float drift (mid-gray 128 stays exactly 128).

use crate::models::FilterMode;

/// A weighted channel sum and the scale it must be divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Luma {
    weighted: u32,
    scale: u32,
}

/// Integer channel weights over a common scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LumaWeights {
    rgb: [u32; 3],
    scale: u32,
}

const BT601: LumaWeights = LumaWeights {
    rgb: [299, 587, 114],
    scale: 1000,
};
const LUMINOSITY: LumaWeights = LumaWeights {
    rgb: [21, 72, 7],
    scale: 100,
};
const AVERAGE: LumaWeights = LumaWeights {
    rgb: [1, 1, 1],
    scale: 3,
};

const SEPIA: [[u32; 3]; 3] = [[393, 769, 189], [349, 686, 168], [272, 534, 131]];
const SEPIA_SCALE: u32 = 1000;

impl LumaWeights {
    /// Weights for the given mode, or `None` for sepia which has no scalar.
    pub(crate) fn for_mode(mode: FilterMode) -> Option<Self> {
        match mode {
            FilterMode::Grayscale | FilterMode::HighContrastBw => Some(BT601),
            FilterMode::Luminosity => Some(LUMINOSITY),
            FilterMode::Average => Some(AVERAGE),
            FilterMode::Sepia => None,
        }
    }

    #[inline]
    pub(crate) fn luma(self, r: u8, g: u8, b: u8) -> Luma {
        let w = self.rgb;
        Luma {
            weighted: w[0] * r as u32 + w[1] * g as u32 + w[2] * b as u32,
            scale: self.scale,
        }
    }
}

impl Luma {
    pub(crate) fn value(self) -> f32 {
        self.weighted as f32 / self.scale as f32
    }

    /// Strict `luma > threshold`, computed without division.
    pub(crate) fn exceeds(self, threshold: u32) -> bool {
        self.weighted > threshold * self.scale
    }

    /// Round half-up to the nearest byte.
    pub(crate) fn rounded(self) -> u8 {
        let v = (2 * self.weighted + self.scale) / (2 * self.scale);
        v.min(255) as u8
    }
}

/// Sepia remap: each output channel is a weighted sum capped at 255,
/// rounded half-up.
pub(crate) fn sepia(r: u8, g: u8, b: u8) -> [u8; 3] {
    let rgb = [r as u32, g as u32, b as u32];
    let mut out = [0u8; 3];
    for (o, row) in out.iter_mut().zip(SEPIA.iter()) {
        let sum = row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2];
        let rounded = (sum + SEPIA_SCALE / 2) / SEPIA_SCALE;
        *o = rounded.min(255) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma_for(mode: FilterMode, r: u8, g: u8, b: u8) -> Luma {
        LumaWeights::for_mode(mode).unwrap().luma(r, g, b)
    }

    #[test]
    fn test_mid_gray_luma_is_exact() {
        let luma = luma_for(FilterMode::Grayscale, 128, 128, 128);
        assert_eq!(luma.rounded(), 128);
        assert_eq!(luma.value(), 128.0);
        assert!(!luma.exceeds(128));
    }

    #[test]
    fn test_exceeds_is_strict() {
        let just_over = luma_for(FilterMode::Average, 129, 128, 128);
        assert!(just_over.exceeds(128));
        let equal = luma_for(FilterMode::Average, 128, 128, 128);
        assert!(!equal.exceeds(128));
    }

    #[test]
    fn test_rounding_half_up() {
        // (1 + 0 + 0) / 3 = 0.33 -> 0, (1 + 1 + 0) / 3 = 0.67 -> 1
        assert_eq!(luma_for(FilterMode::Average, 1, 0, 0).rounded(), 0);
        assert_eq!(luma_for(FilterMode::Average, 1, 1, 0).rounded(), 1);
        // 0.21 * 50 + 0.72 * 0 + 0.07 * 50 = 14.0 exactly
        assert_eq!(luma_for(FilterMode::Luminosity, 50, 0, 50).rounded(), 14);
        // 0.21 * 10 + 0.07 * 20 + 0 = 3.5 -> 4 (half-up)
        assert_eq!(luma_for(FilterMode::Luminosity, 10, 0, 20).rounded(), 4);
    }

    #[test]
    fn test_white_stays_in_range() {
        for mode in [FilterMode::Grayscale, FilterMode::Luminosity, FilterMode::Average] {
            let luma = luma_for(mode, 255, 255, 255);
            assert_eq!(luma.rounded(), 255, "{:?}", mode);
        }
    }

    #[test]
    fn test_sepia_has_no_luma() {
        assert!(LumaWeights::for_mode(FilterMode::Sepia).is_none());
    }

    #[test]
    fn test_sepia_values() {
        // 81.53 -> 82, 72.56 -> 73, 56.52 -> 57
        assert_eq!(sepia(100, 50, 20), [82, 73, 57]);
        assert_eq!(sepia(0, 0, 0), [0, 0, 0]);
        assert_eq!(sepia(255, 255, 255), [255, 255, 239]);
    }
}
