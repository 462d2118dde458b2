//! Brightness/contrast parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToneError};

/// Lowest accepted brightness/contrast percentage.
pub const TONE_PERCENT_MIN: i32 = 50;
/// Highest accepted brightness/contrast percentage.
pub const TONE_PERCENT_MAX: i32 = 150;
/// The neutral percentage: no change.
pub const TONE_PERCENT_NEUTRAL: i32 = 100;

/// Brightness and contrast, each as a percentage in [50, 150].
///
/// Only the grayscale, luminosity and average modes read these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneParameters {
    pub brightness_percent: i32,
    pub contrast_percent: i32,
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            brightness_percent: TONE_PERCENT_NEUTRAL,
            contrast_percent: TONE_PERCENT_NEUTRAL,
        }
    }
}

impl ToneParameters {
    /// Validated constructor.
    pub fn new(brightness_percent: i32, contrast_percent: i32) -> Result<Self> {
        let tone = Self {
            brightness_percent,
            contrast_percent,
        };
        tone.validate()?;
        Ok(tone)
    }

    /// Clamp both values into range instead of rejecting them, the way a
    /// slider would.
    pub fn clamped(brightness_percent: i32, contrast_percent: i32) -> Self {
        Self {
            brightness_percent: brightness_percent.clamp(TONE_PERCENT_MIN, TONE_PERCENT_MAX),
            contrast_percent: contrast_percent.clamp(TONE_PERCENT_MIN, TONE_PERCENT_MAX),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (value, name) in [
            (self.brightness_percent, "brightness"),
            (self.contrast_percent, "contrast"),
        ] {
            if !(TONE_PERCENT_MIN..=TONE_PERCENT_MAX).contains(&value) {
                return Err(ToneError::invalid(format!(
                    "{} {}% must be in range [{}, {}]",
                    name, value, TONE_PERCENT_MIN, TONE_PERCENT_MAX
                )));
            }
        }
        Ok(())
    }

    /// Both values at 100%.
    pub fn is_neutral(&self) -> bool {
        self.brightness_percent == TONE_PERCENT_NEUTRAL
            && self.contrast_percent == TONE_PERCENT_NEUTRAL
    }

    /// Multiplier applied to the luma before contrast.
    pub fn brightness_factor(&self) -> f32 {
        self.brightness_percent as f32 / 100.0
    }

    /// Contrast gain around mid-gray (128).
    ///
    /// The percentage is shifted so 100% maps to a contrast offset of 0,
    /// which makes the factor exactly 1.0: neutral tone is the identity.
    /// Feeding the raw percentage into the classic formula would not be.
    pub fn contrast_factor(&self) -> f32 {
        let c = (self.contrast_percent - TONE_PERCENT_NEUTRAL) as f32;
        (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let tone = ToneParameters::default();
        assert_eq!(tone.brightness_percent, 100);
        assert_eq!(tone.contrast_percent, 100);
        assert!(tone.is_neutral());
        assert_eq!(tone.brightness_factor(), 1.0);
        assert_eq!(tone.contrast_factor(), 1.0);
    }

    #[test]
    fn test_new_accepts_bounds() {
        assert!(ToneParameters::new(50, 150).is_ok());
        assert!(ToneParameters::new(150, 50).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        for (b, c) in [(49, 100), (100, 151), (0, 0), (200, 100)] {
            let err = ToneParameters::new(b, c).unwrap_err();
            assert!(
                matches!(err, ToneError::InvalidArgument(_)),
                "({}, {}) should be rejected",
                b,
                c
            );
        }
    }

    #[test]
    fn test_clamped() {
        let tone = ToneParameters::clamped(10, 400);
        assert_eq!(tone.brightness_percent, 50);
        assert_eq!(tone.contrast_percent, 150);
    }

    #[test]
    fn test_contrast_factor_direction() {
        let low = ToneParameters::new(100, 50).unwrap().contrast_factor();
        let high = ToneParameters::new(100, 150).unwrap().contrast_factor();
        assert!(low < 1.0, "50% contrast should flatten, got {}", low);
        assert!(high > 1.0, "150% contrast should steepen, got {}", high);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let tone: ToneParameters = serde_yaml::from_str("brightness_percent: 120").unwrap();
        assert_eq!(tone.brightness_percent, 120);
        assert_eq!(tone.contrast_percent, 100);
    }
}
