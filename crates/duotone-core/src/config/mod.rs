//! Configuration loading.
//!
//! The config is an explicit value handed to the render functions; nothing
//! here is process-global. Loading never fails: unreadable or invalid files
//! are reported as warnings and built-in defaults are used instead.

mod defaults;

pub use defaults::{DuotoneConfig, DEFAULT_MAX_MEGAPIXELS, DEFAULT_PREVIEW_MAX_DIMENSION};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ToneError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DUOTONE_CONFIG";

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["duotone.yml", "duotone.yaml"];

/// Loaded configuration, where it came from, and anything worth telling the
/// user about it.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    pub config: DuotoneConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: DuotoneConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Candidates are tried in order (explicit path, `$DUOTONE_CONFIG`,
/// `./config/duotone.yml`, `./duotone.yml`, `~/duotone/duotone.yml`); the
/// first one that parses wins.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let cwd = std::env::current_dir().ok();
    let candidates = config_candidates(custom_path, env_path, cwd, dirs::home_dir());
    load_from_candidates(&candidates)
}

fn load_from_candidates(candidates: &[PathBuf]) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(candidate) {
            Ok(contents) => match serde_yaml::from_str::<DuotoneConfig>(&contents) {
                Ok(mut config) => {
                    warnings.extend(config.sanitize());
                    let source = fs::canonicalize(candidate).unwrap_or_else(|_| candidate.clone());
                    log::debug!("loaded config from {}", source.display());
                    return ConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    log::debug!("no config file found; using built-in defaults");
    ConfigHandle::with_config(DuotoneConfig::default(), None, warnings)
}

/// Ordered list of config file candidates.
fn config_candidates(
    custom_path: Option<&Path>,
    env_path: Option<PathBuf>,
    cwd: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Some(path) = env_path {
        candidates.push(path);
    }

    if let Some(cwd) = cwd {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home) = home_dir {
        for name in CONFIG_FILENAMES {
            candidates.push(home.join("duotone").join(name));
        }
    }

    candidates
}

/// Default location for a user config file: `~/duotone/duotone.yml`.
pub fn user_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ToneError::invalid("Could not determine home directory"))?;
    Ok(home.join("duotone").join(CONFIG_FILENAMES[0]))
}

/// Write `config` as YAML, creating parent directories as needed.
pub fn save_config<P: AsRef<Path>>(config: &DuotoneConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ToneError::io(format!("Failed to create directory {}", parent.display()), e)
        })?;
    }
    let yaml = serde_yaml::to_string(config)
        .map_err(|e| ToneError::invalid(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, yaml)
        .map_err(|e| ToneError::io(format!("Failed to write config {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerFormat, FilterMode};

    #[test]
    fn test_candidate_order() {
        let candidates = config_candidates(
            Some(Path::new("/explicit.yml")),
            Some(PathBuf::from("/env.yml")),
            Some(PathBuf::from("/work")),
            Some(PathBuf::from("/home/me")),
        );
        assert_eq!(candidates[0], PathBuf::from("/explicit.yml"));
        assert_eq!(candidates[1], PathBuf::from("/env.yml"));
        assert_eq!(candidates[2], PathBuf::from("/work/config/duotone.yml"));
        assert_eq!(candidates[3], PathBuf::from("/work/duotone.yml"));
        assert_eq!(
            candidates.last().unwrap(),
            &PathBuf::from("/home/me/duotone/duotone.yaml")
        );
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let handle = load_from_candidates(&[PathBuf::from("/nonexistent/duotone.yml")]);
        assert_eq!(handle.config, DuotoneConfig::default());
        assert!(handle.source.is_none());
        assert!(handle.warnings.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duotone.yml");
        fs::write(
            &path,
            "preview_max_dimension: 320\ndefault_mode: sepia\ndefault_format: webp\n",
        )
        .unwrap();

        let handle = load_from_candidates(&[path]);
        assert!(handle.source.is_some());
        assert_eq!(handle.config.preview_max_dimension, 320);
        assert_eq!(handle.config.default_mode, FilterMode::Sepia);
        assert_eq!(handle.config.default_format, ContainerFormat::WebP);
        assert_eq!(handle.config.jpeg_quality, DuotoneConfig::default().jpeg_quality);
    }

    #[test]
    fn test_invalid_yaml_warns_and_tries_next() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.yml");
        let good = dir.path().join("good.yml");
        fs::write(&bad, "preview_max_dimension: [not, a, number]").unwrap();
        fs::write(&good, "jpeg_quality: 70").unwrap();

        let handle = load_from_candidates(&[bad, good]);
        assert_eq!(handle.config.jpeg_quality, 70);
        assert_eq!(handle.warnings.len(), 1);
        assert!(handle.warnings[0].contains("Failed to parse config"));
    }

    #[test]
    fn test_out_of_range_values_are_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duotone.yml");
        fs::write(
            &path,
            "preview_max_dimension: 0\njpeg_quality: 0\nwebp_quality: 120\ndefault_tone:\n  brightness_percent: 300\n",
        )
        .unwrap();

        let handle = load_from_candidates(&[path]);
        let defaults = DuotoneConfig::default();
        assert_eq!(handle.config.preview_max_dimension, defaults.preview_max_dimension);
        assert_eq!(handle.config.jpeg_quality, defaults.jpeg_quality);
        assert_eq!(handle.config.webp_quality, defaults.webp_quality);
        assert_eq!(handle.config.default_tone, defaults.default_tone);
        assert_eq!(handle.warnings.len(), 4);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("duotone.yml");
        let config = DuotoneConfig {
            default_mode: FilterMode::Luminosity,
            jpeg_quality: 55,
            ..DuotoneConfig::default()
        };

        save_config(&config, &path).unwrap();
        let handle = load_from_candidates(&[path]);
        assert_eq!(handle.config, config);
    }

    #[test]
    fn test_quality_for() {
        let config = DuotoneConfig::default();
        assert_eq!(config.quality_for(ContainerFormat::Jpeg), Some(config.jpeg_quality));
        assert_eq!(config.quality_for(ContainerFormat::WebP), Some(config.webp_quality));
        assert_eq!(config.quality_for(ContainerFormat::Gif), None);
    }
}
