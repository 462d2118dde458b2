//! Processing parameter types for CLI commands.

use duotone_core::config::DuotoneConfig;
use duotone_core::models::{ContainerFormat, FilterMode, TonePreset, ToneParameters};

use crate::parsers::{parse_filter_mode, parse_format, parse_quality, parse_tone};

/// Parameters for processing a single image.
/// Used by both filter and batch commands to avoid duplication.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingParams {
    pub mode: FilterMode,
    pub tone: ToneParameters,
    pub format: ContainerFormat,
    /// Lossy quality override; `None` uses the configured default
    pub quality: Option<u8>,
    pub silent: bool,
    pub verbose: bool,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self::from_config(&DuotoneConfig::default())
    }
}

impl ProcessingParams {
    /// Start from the configured defaults.
    pub fn from_config(config: &DuotoneConfig) -> Self {
        Self {
            mode: config.default_mode,
            tone: config.default_tone,
            format: config.default_format,
            quality: None,
            silent: false,
            verbose: false,
        }
    }

    /// Layer command-line settings over the config: config defaults first,
    /// then the preset, then explicit flags.
    pub fn resolve(
        config: &DuotoneConfig,
        preset: Option<&TonePreset>,
        mode: Option<&str>,
        brightness: Option<i32>,
        contrast: Option<i32>,
        format: Option<&str>,
        quality: Option<u8>,
    ) -> Result<Self, String> {
        let mut params = Self::from_config(config);
        if let Some(preset) = preset {
            params.apply_preset(preset);
        }
        if let Some(mode) = mode {
            params.mode = parse_filter_mode(mode)?;
        }
        params.tone = parse_tone(brightness, contrast, params.tone)?;
        if let Some(format) = format {
            params.format = parse_format(format)?;
        }
        params.quality = parse_quality(quality)?;
        Ok(params)
    }

    /// Take mode and tone from a preset.
    pub fn apply_preset(&mut self, preset: &TonePreset) {
        self.mode = preset.mode;
        self.tone = preset.tone;
    }

    /// File name suffix for outputs, e.g. `photo_sepia.png`.
    pub fn output_suffix(&self) -> &'static str {
        self.mode.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let config = DuotoneConfig {
            default_mode: FilterMode::Average,
            default_format: ContainerFormat::WebP,
            ..DuotoneConfig::default()
        };
        let params = ProcessingParams::from_config(&config);
        assert_eq!(params.mode, FilterMode::Average);
        assert_eq!(params.format, ContainerFormat::WebP);
        assert_eq!(params.quality, None);
    }

    #[test]
    fn test_resolve_precedence() {
        let config = DuotoneConfig {
            default_mode: FilterMode::Average,
            ..DuotoneConfig::default()
        };
        let preset = TonePreset::new(
            "Faded",
            FilterMode::Sepia,
            ToneParameters::new(115, 70).unwrap(),
        );

        let params = ProcessingParams::resolve(&config, None, None, None, None, None, None).unwrap();
        assert_eq!(params.mode, FilterMode::Average);

        let params =
            ProcessingParams::resolve(&config, Some(&preset), None, None, Some(90), Some("jpg"), Some(60))
                .unwrap();
        assert_eq!(params.mode, FilterMode::Sepia);
        assert_eq!(params.tone, ToneParameters::new(115, 90).unwrap());
        assert_eq!(params.format, ContainerFormat::Jpeg);
        assert_eq!(params.quality, Some(60));

        let params =
            ProcessingParams::resolve(&config, Some(&preset), Some("bw"), None, None, None, None)
                .unwrap();
        assert_eq!(params.mode, FilterMode::HighContrastBw);
    }

    #[test]
    fn test_resolve_rejects_bad_flags() {
        let config = DuotoneConfig::default();
        assert!(ProcessingParams::resolve(&config, None, Some("neon"), None, None, None, None).is_err());
        assert!(ProcessingParams::resolve(&config, None, None, Some(200), None, None, None).is_err());
        assert!(ProcessingParams::resolve(&config, None, None, None, None, Some("tga"), None).is_err());
        assert!(ProcessingParams::resolve(&config, None, None, None, None, None, Some(0)).is_err());
    }

    #[test]
    fn test_apply_preset() {
        let mut params = ProcessingParams::default();
        let preset = TonePreset::new(
            "Punchy",
            FilterMode::Luminosity,
            ToneParameters::new(105, 135).unwrap(),
        );
        params.apply_preset(&preset);
        assert_eq!(params.mode, FilterMode::Luminosity);
        assert_eq!(params.tone.contrast_percent, 135);
        assert_eq!(params.output_suffix(), "luminosity");
    }
}
