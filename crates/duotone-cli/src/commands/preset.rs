use std::path::{Path, PathBuf};

use duotone_cli::{parse_filter_mode, parse_tone};
use duotone_core::models::{FilterMode, TonePreset, ToneParameters};
use duotone_core::presets::{
    get_presets_dir, list_tone_presets, load_tone_preset, save_tone_preset, validate_preset_name,
};

/// List available tone presets in the specified or default directory.
pub fn cmd_preset_list(dir: Option<PathBuf>) -> Result<(), String> {
    let dir = dir.unwrap_or_else(|| get_presets_dir().unwrap_or_else(|_| PathBuf::from("presets")));

    println!("Listing presets in: {}", dir.display());
    match list_tone_presets(&dir) {
        Ok(presets) => {
            if presets.is_empty() {
                println!("No presets found.");
            } else {
                for preset in presets {
                    println!("  {}", preset);
                }
            }
            Ok(())
        }
        Err(e) => Err(format!("Failed to list presets: {}", e)),
    }
}

/// Display a tone preset, given as a file path or a name in the presets
/// directory.
pub fn cmd_preset_show(preset: String) -> Result<(), String> {
    println!("Loading preset: {}", preset);

    let preset_obj = load_named_or_path(&preset)?;

    println!("\nPreset: {}", preset_obj.name);
    println!("  Mode:       {}", preset_obj.mode);
    println!("  Brightness: {}%", preset_obj.tone.brightness_percent);
    println!("  Contrast:   {}%", preset_obj.tone.contrast_percent);
    if !preset_obj.mode.uses_tone() {
        println!("  (brightness and contrast are not used by this mode)");
    }

    if let Some(notes) = &preset_obj.notes {
        println!("\nNotes: {}", notes);
    }

    println!();
    Ok(())
}

/// Create a new tone preset file.
pub fn cmd_preset_create(
    output: PathBuf,
    name: String,
    mode: Option<String>,
    brightness: Option<i32>,
    contrast: Option<i32>,
) -> Result<(), String> {
    println!("Creating new preset: {}", name);

    let mode = match mode {
        Some(m) => parse_filter_mode(&m)?,
        None => FilterMode::default(),
    };
    let tone = parse_tone(brightness, contrast, ToneParameters::default())?;

    let mut preset = TonePreset::new(name.clone(), mode, tone);
    preset.notes = Some(format!("Tone preset: {}", name));

    save_tone_preset(&preset, &output)?;

    println!("Preset created: {}", output.display());
    println!("You can now edit this file to customize the parameters.");
    println!();

    Ok(())
}

fn load_named_or_path(preset: &str) -> Result<TonePreset, String> {
    // Try to load as file first
    let preset_path = Path::new(preset);
    if preset_path.exists() {
        return Ok(load_tone_preset(preset_path)?);
    }

    // Validate preset name before constructing path to prevent path traversal
    validate_preset_name(preset)?;
    let dir = get_presets_dir()?;
    let yml = dir.join(format!("{}.yml", preset));
    let path = if yml.exists() {
        yml
    } else {
        dir.join(format!("{}.yaml", preset))
    };
    Ok(load_tone_preset(&path)?)
}
