//! Parsers for filter modes, formats, quality and tone arguments.

use duotone_core::models::{ContainerFormat, FilterMode, ToneParameters};

/// Parse a filter mode name ("grayscale", "luminosity", "average", "sepia",
/// "high-contrast"/"bw").
pub fn parse_filter_mode(mode_str: &str) -> Result<FilterMode, String> {
    mode_str.parse::<FilterMode>().map_err(|e| e.to_string())
}

/// Parse an output container name or extension ("png", "jpg", "webp", ...).
pub fn parse_format(format_str: &str) -> Result<ContainerFormat, String> {
    format_str
        .parse::<ContainerFormat>()
        .map_err(|e| e.to_string())
}

/// Check a `--quality` value.
pub fn parse_quality(quality: Option<u8>) -> Result<Option<u8>, String> {
    match quality {
        Some(q) if !(1..=100).contains(&q) => {
            Err(format!("Quality {} must be in range [1, 100]", q))
        }
        other => Ok(other),
    }
}

/// Overlay `--brightness` / `--contrast` percentages on `base`.
///
/// Values outside [50, 150] are rejected rather than clamped.
pub fn parse_tone(
    brightness: Option<i32>,
    contrast: Option<i32>,
    base: ToneParameters,
) -> Result<ToneParameters, String> {
    let tone = ToneParameters {
        brightness_percent: brightness.unwrap_or(base.brightness_percent),
        contrast_percent: contrast.unwrap_or(base.contrast_percent),
    };
    tone.validate()?;
    Ok(tone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_mode() {
        assert_eq!(parse_filter_mode("sepia").unwrap(), FilterMode::Sepia);
        assert_eq!(parse_filter_mode("bw").unwrap(), FilterMode::HighContrastBw);
        let err = parse_filter_mode("vivid").unwrap_err();
        assert!(err.contains("unknown filter mode 'vivid'"), "{}", err);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("jpg").unwrap(), ContainerFormat::Jpeg);
        assert_eq!(parse_format("PNG").unwrap(), ContainerFormat::Png);
        assert!(parse_format("tiff").is_err());
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality(None).unwrap(), None);
        assert_eq!(parse_quality(Some(1)).unwrap(), Some(1));
        assert_eq!(parse_quality(Some(100)).unwrap(), Some(100));
        assert!(parse_quality(Some(0)).is_err());
        assert!(parse_quality(Some(101)).is_err());
    }

    #[test]
    fn test_parse_tone_overlays_base() {
        let base = ToneParameters::new(120, 80).unwrap();
        let tone = parse_tone(None, Some(140), base).unwrap();
        assert_eq!(tone.brightness_percent, 120);
        assert_eq!(tone.contrast_percent, 140);

        assert_eq!(parse_tone(None, None, base).unwrap(), base);
    }

    #[test]
    fn test_parse_tone_rejects_out_of_range() {
        assert!(parse_tone(Some(49), None, ToneParameters::default()).is_err());
        assert!(parse_tone(None, Some(151), ToneParameters::default()).is_err());
    }
}
