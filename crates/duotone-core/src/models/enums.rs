//! Enums for filter and output selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToneError;

/// Per-pixel formula applied by the transform engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// BT.601 luma (0.299, 0.587, 0.114) with brightness/contrast
    #[default]
    Grayscale,

    /// Luminosity weights (0.21, 0.72, 0.07) with brightness/contrast
    Luminosity,

    /// Plain channel mean with brightness/contrast
    Average,

    /// Classic sepia matrix. Brightness/contrast are ignored.
    Sepia,

    /// BT.601 luma thresholded to pure black or white.
    /// Brightness/contrast are ignored.
    #[serde(alias = "bw")]
    HighContrastBw,
}

impl FilterMode {
    pub const ALL: [FilterMode; 5] = [
        FilterMode::Grayscale,
        FilterMode::Luminosity,
        FilterMode::Average,
        FilterMode::Sepia,
        FilterMode::HighContrastBw,
    ];

    /// Whether brightness/contrast have any effect in this mode.
    pub fn uses_tone(self) -> bool {
        matches!(
            self,
            FilterMode::Grayscale | FilterMode::Luminosity | FilterMode::Average
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Grayscale => "grayscale",
            FilterMode::Luminosity => "luminosity",
            FilterMode::Average => "average",
            FilterMode::Sepia => "sepia",
            FilterMode::HighContrastBw => "high-contrast",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(FilterMode::Grayscale),
            "luminosity" => Ok(FilterMode::Luminosity),
            "average" | "avg" => Ok(FilterMode::Average),
            "sepia" => Ok(FilterMode::Sepia),
            "high-contrast" | "highcontrast" | "high-contrast-bw" | "bw" => {
                Ok(FilterMode::HighContrastBw)
            }
            other => Err(ToneError::invalid(format!(
                "unknown filter mode '{}' (expected grayscale, luminosity, average, sepia or high-contrast)",
                other
            ))),
        }
    }
}

/// Container formats we can decode from and encode to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    #[default]
    Png,
    Jpeg,
    #[serde(rename = "webp")]
    WebP,
    Bmp,
    Gif,
}

impl ContainerFormat {
    pub const ALL: [ContainerFormat; 5] = [
        ContainerFormat::Png,
        ContainerFormat::Jpeg,
        ContainerFormat::WebP,
        ContainerFormat::Bmp,
        ContainerFormat::Gif,
    ];

    /// Lossy formats honour a quality value; the rest ignore it.
    pub fn is_lossy(self) -> bool {
        matches!(self, ContainerFormat::Jpeg | ContainerFormat::WebP)
    }

    /// Preferred file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Png => "png",
            ContainerFormat::Jpeg => "jpg",
            ContainerFormat::WebP => "webp",
            ContainerFormat::Bmp => "bmp",
            ContainerFormat::Gif => "gif",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ContainerFormat::Png => "image/png",
            ContainerFormat::Jpeg => "image/jpeg",
            ContainerFormat::WebP => "image/webp",
            ContainerFormat::Bmp => "image/bmp",
            ContainerFormat::Gif => "image/gif",
        }
    }

    /// Guess a format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ContainerFormat::Png),
            "jpg" | "jpeg" => Some(ContainerFormat::Jpeg),
            "webp" => Some(ContainerFormat::WebP),
            "bmp" => Some(ContainerFormat::Bmp),
            "gif" => Some(ContainerFormat::Gif),
            _ => None,
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            ContainerFormat::Png => image::ImageFormat::Png,
            ContainerFormat::Jpeg => image::ImageFormat::Jpeg,
            ContainerFormat::WebP => image::ImageFormat::WebP,
            ContainerFormat::Bmp => image::ImageFormat::Bmp,
            ContainerFormat::Gif => image::ImageFormat::Gif,
        }
    }

    pub(crate) fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ContainerFormat::Png),
            image::ImageFormat::Jpeg => Some(ContainerFormat::Jpeg),
            image::ImageFormat::WebP => Some(ContainerFormat::WebP),
            image::ImageFormat::Bmp => Some(ContainerFormat::Bmp),
            image::ImageFormat::Gif => Some(ContainerFormat::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContainerFormat::Png => "PNG",
            ContainerFormat::Jpeg => "JPEG",
            ContainerFormat::WebP => "WebP",
            ContainerFormat::Bmp => "BMP",
            ContainerFormat::Gif => "GIF",
        };
        f.write_str(label)
    }
}

impl FromStr for ContainerFormat {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        ContainerFormat::from_extension(trimmed).ok_or_else(|| {
            ToneError::UnsupportedFormat(format!(
                "'{}' (expected png, jpeg, webp, bmp or gif)",
                s.trim()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_mode_parse_aliases() {
        assert_eq!("Grayscale".parse::<FilterMode>().unwrap(), FilterMode::Grayscale);
        assert_eq!("grey".parse::<FilterMode>().unwrap(), FilterMode::Grayscale);
        assert_eq!("avg".parse::<FilterMode>().unwrap(), FilterMode::Average);
        assert_eq!("bw".parse::<FilterMode>().unwrap(), FilterMode::HighContrastBw);
        assert_eq!(
            " high-contrast ".parse::<FilterMode>().unwrap(),
            FilterMode::HighContrastBw
        );
    }

    #[test]
    fn test_filter_mode_parse_unknown() {
        let err = "posterize".parse::<FilterMode>().unwrap_err();
        assert!(matches!(err, ToneError::InvalidArgument(_)));
    }

    #[test]
    fn test_filter_mode_display_roundtrips_through_parse() {
        for mode in FilterMode::ALL {
            assert_eq!(mode.to_string().parse::<FilterMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_uses_tone_only_for_luma_modes() {
        assert!(FilterMode::Grayscale.uses_tone());
        assert!(FilterMode::Luminosity.uses_tone());
        assert!(FilterMode::Average.uses_tone());
        assert!(!FilterMode::Sepia.uses_tone());
        assert!(!FilterMode::HighContrastBw.uses_tone());
    }

    #[test]
    fn test_filter_mode_yaml_names() {
        let mode: FilterMode = serde_yaml::from_str("high-contrast-bw").unwrap();
        assert_eq!(mode, FilterMode::HighContrastBw);
        let mode: FilterMode = serde_yaml::from_str("bw").unwrap();
        assert_eq!(mode, FilterMode::HighContrastBw);
        assert_eq!(serde_yaml::to_string(&FilterMode::Sepia).unwrap().trim(), "sepia");
    }

    #[test]
    fn test_container_format_parse() {
        assert_eq!("PNG".parse::<ContainerFormat>().unwrap(), ContainerFormat::Png);
        assert_eq!("jpeg".parse::<ContainerFormat>().unwrap(), ContainerFormat::Jpeg);
        assert_eq!(".jpg".parse::<ContainerFormat>().unwrap(), ContainerFormat::Jpeg);
        assert_eq!("webp".parse::<ContainerFormat>().unwrap(), ContainerFormat::WebP);
    }

    #[test]
    fn test_container_format_unsupported() {
        let err = "tiff".parse::<ContainerFormat>().unwrap_err();
        assert!(matches!(err, ToneError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_lossy_formats() {
        let lossy: Vec<_> = ContainerFormat::ALL
            .iter()
            .filter(|f| f.is_lossy())
            .copied()
            .collect();
        assert_eq!(lossy, vec![ContainerFormat::Jpeg, ContainerFormat::WebP]);
    }
}
