//! Tone preset management
//!
//! Load, save, and list named filter/tone combinations stored as YAML.

use std::path::{Path, PathBuf};

use crate::error::{Result, ToneError};
use crate::models::{FilterMode, TonePreset, ToneParameters};

/// Validate a preset name to prevent path traversal.
/// Rejects names containing path separators, "..", or other dangerous patterns.
pub fn validate_preset_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ToneError::invalid("Preset name cannot be empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ToneError::invalid("Preset name cannot contain path separators"));
    }
    if name.contains("..") {
        return Err(ToneError::invalid("Preset name cannot contain '..'"));
    }
    if name.starts_with('.') {
        return Err(ToneError::invalid("Preset name cannot start with '.'"));
    }
    if name.contains('\0') {
        return Err(ToneError::invalid("Preset name cannot contain null bytes"));
    }
    Ok(())
}

/// Load a tone preset from a YAML file. The stored tone is validated.
pub fn load_tone_preset<P: AsRef<Path>>(path: P) -> Result<TonePreset> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ToneError::io(format!("Failed to read preset file {}", path.display()), e))?;
    let preset: TonePreset = serde_yaml::from_str(&contents)
        .map_err(|e| ToneError::invalid(format!("Failed to parse preset YAML: {}", e)))?;
    preset.tone.validate()?;
    Ok(preset)
}

/// Save a tone preset to a YAML file
pub fn save_tone_preset<P: AsRef<Path>>(preset: &TonePreset, path: P) -> Result<()> {
    let path = path.as_ref();
    preset.tone.validate()?;
    let yaml = serde_yaml::to_string(preset)
        .map_err(|e| ToneError::invalid(format!("Failed to serialize preset: {}", e)))?;
    std::fs::write(path, yaml)
        .map_err(|e| ToneError::io(format!("Failed to write preset file {}", path.display()), e))
}

/// List the preset file stems (`*.yml`, `*.yaml`) in a directory, sorted.
pub fn list_tone_presets<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ToneError::io(format!("Failed to read presets directory {}", dir.display()), e)
    })?;

    let mut presets = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ToneError::io("Failed to read directory entry".to_string(), e))?;
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        );
        if is_yaml {
            if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                presets.push(name.to_string());
            }
        }
    }

    presets.sort();
    Ok(presets)
}

/// Default presets directory: `~/duotone/presets`. Created if missing.
pub fn get_presets_dir() -> Result<PathBuf> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| ToneError::invalid("Could not determine home directory"))?;
    let presets_dir = home_dir.join("duotone").join("presets");

    if !presets_dir.exists() {
        std::fs::create_dir_all(&presets_dir).map_err(|e| {
            ToneError::io(format!("Failed to create {}", presets_dir.display()), e)
        })?;
    }

    Ok(presets_dir)
}

/// Presets shipped with the tool, written out by `duotone init`.
pub fn builtin_presets() -> Vec<(&'static str, TonePreset)> {
    vec![
        (
            "classic-gray",
            TonePreset::new("Classic Gray", FilterMode::Grayscale, ToneParameters::default()),
        ),
        (
            "punchy-mono",
            TonePreset::new(
                "Punchy Mono",
                FilterMode::Luminosity,
                ToneParameters::clamped(105, 135),
            ),
        ),
        (
            "faded-print",
            TonePreset::new("Faded Print", FilterMode::Average, ToneParameters::clamped(115, 70)),
        ),
        (
            "sepia",
            TonePreset::new("Sepia", FilterMode::Sepia, ToneParameters::default()),
        ),
        (
            "stencil",
            TonePreset::new(
                "Stencil",
                FilterMode::HighContrastBw,
                ToneParameters::default(),
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_preset_name() {
        assert!(validate_preset_name("soft-sepia").is_ok());
        assert!(validate_preset_name("").is_err());
        assert!(validate_preset_name("../etc/passwd").is_err());
        assert!(validate_preset_name("a/b").is_err());
        assert!(validate_preset_name("a\\b").is_err());
        assert!(validate_preset_name(".hidden").is_err());
        assert!(validate_preset_name("nul\0byte").is_err());
    }

    #[test]
    fn test_save_load_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let preset = TonePreset {
            name: "Warm Shadows".to_string(),
            mode: FilterMode::Luminosity,
            tone: ToneParameters::new(90, 120).unwrap(),
            notes: Some("for portraits".to_string()),
        };

        save_tone_preset(&preset, dir.path().join("warm.yml")).unwrap();
        save_tone_preset(&builtin_presets()[0].1, dir.path().join("basic.yaml")).unwrap();
        std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

        let loaded = load_tone_preset(dir.path().join("warm.yml")).unwrap();
        assert_eq!(loaded, preset);

        let names = list_tone_presets(dir.path()).unwrap();
        assert_eq!(names, vec!["basic".to_string(), "warm".to_string()]);
    }

    #[test]
    fn test_load_minimal_preset_defaults_tone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("min.yml");
        std::fs::write(&path, "name: Minimal\nmode: high-contrast-bw\n").unwrap();

        let preset = load_tone_preset(&path).unwrap();
        assert_eq!(preset.mode, FilterMode::HighContrastBw);
        assert!(preset.tone.is_neutral());
        assert!(preset.notes.is_none());
    }

    #[test]
    fn test_load_rejects_out_of_range_tone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        std::fs::write(
            &path,
            "name: Bad\nmode: grayscale\ntone:\n  brightness_percent: 10\n  contrast_percent: 100\n",
        )
        .unwrap();

        let err = load_tone_preset(&path).unwrap_err();
        assert!(matches!(err, ToneError::InvalidArgument(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tone_preset("/nonexistent/preset.yml").unwrap_err();
        assert!(matches!(err, ToneError::Io { .. }));
    }

    #[test]
    fn test_builtin_presets_are_valid() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), FilterMode::ALL.len());
        for (slug, preset) in presets {
            assert!(validate_preset_name(slug).is_ok());
            assert!(preset.tone.validate().is_ok());
        }
    }
}
