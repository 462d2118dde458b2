//! Default values and their sanitization.

use serde::{Deserialize, Serialize};

use crate::exporters::{DEFAULT_JPEG_QUALITY, DEFAULT_WEBP_QUALITY};
use crate::models::{ContainerFormat, FilterMode, ToneParameters};

/// Longest side of a preview render, in pixels.
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 500;

/// Sources larger than this are refused.
pub const DEFAULT_MAX_MEGAPIXELS: u32 = 100;

/// Settings read from `duotone.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuotoneConfig {
    /// Preview downsampling cap (longest side)
    pub preview_max_dimension: u32,
    /// Filter used when none is given
    pub default_mode: FilterMode,
    /// Brightness/contrast used when none are given
    pub default_tone: ToneParameters,
    /// Export container used when none is given
    pub default_format: ContainerFormat,
    /// JPEG quality when none is given (1-100)
    pub jpeg_quality: u8,
    /// WebP quality when none is given (1-100, 100 = lossless)
    pub webp_quality: u8,
    /// Largest accepted source, in megapixels
    pub max_megapixels: u32,
}

impl Default for DuotoneConfig {
    fn default() -> Self {
        Self {
            preview_max_dimension: DEFAULT_PREVIEW_MAX_DIMENSION,
            default_mode: FilterMode::Grayscale,
            default_tone: ToneParameters::default(),
            default_format: ContainerFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            webp_quality: DEFAULT_WEBP_QUALITY,
            max_megapixels: DEFAULT_MAX_MEGAPIXELS,
        }
    }
}

impl DuotoneConfig {
    /// Quality to use for `format` when the caller did not choose one.
    pub fn quality_for(&self, format: ContainerFormat) -> Option<u8> {
        match format {
            ContainerFormat::Jpeg => Some(self.jpeg_quality),
            ContainerFormat::WebP => Some(self.webp_quality),
            _ => None,
        }
    }

    /// Reset out-of-range values to their defaults, returning one warning
    /// per reset field.
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if self.preview_max_dimension == 0 {
            warnings.push(format!(
                "preview_max_dimension must be positive; using {}",
                defaults.preview_max_dimension
            ));
            self.preview_max_dimension = defaults.preview_max_dimension;
        }
        if self.default_tone.validate().is_err() {
            warnings.push(format!(
                "default_tone {:?} out of range [50, 150]; using 100/100",
                self.default_tone
            ));
            self.default_tone = defaults.default_tone;
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            warnings.push(format!(
                "jpeg_quality {} out of range [1, 100]; using {}",
                self.jpeg_quality, defaults.jpeg_quality
            ));
            self.jpeg_quality = defaults.jpeg_quality;
        }
        if !(1..=100).contains(&self.webp_quality) {
            warnings.push(format!(
                "webp_quality {} out of range [1, 100]; using {}",
                self.webp_quality, defaults.webp_quality
            ));
            self.webp_quality = defaults.webp_quality;
        }
        if self.max_megapixels == 0 {
            warnings.push(format!(
                "max_megapixels must be positive; using {}",
                defaults.max_megapixels
            ));
            self.max_megapixels = defaults.max_megapixels;
        }

        warnings
    }
}
