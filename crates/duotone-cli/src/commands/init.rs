use std::path::Path;

use duotone_core::config::{save_config, user_config_path, DuotoneConfig};
use duotone_core::presets::{builtin_presets, save_tone_preset};

/// Initialize the user configuration directory.
///
/// Writes `~/duotone/duotone.yml` with default settings and the built-in
/// presets to `~/duotone/presets/`. Safe to run multiple times - won't
/// overwrite existing files unless `force` is true.
pub fn cmd_init(force: bool) -> Result<(), String> {
    let config_path = user_config_path()?;
    let duotone_dir = config_path
        .parent()
        .ok_or("Could not determine config directory")?
        .to_path_buf();

    println!(
        "Initializing duotone configuration in: {}",
        duotone_dir.display()
    );
    println!();

    init_into(&duotone_dir, &config_path, force)?;

    println!();
    println!("Initialization complete!");
    println!();
    println!("Configuration files are now in:");
    println!("  ~/duotone/duotone.yml  - Default filter and export settings");
    println!("  ~/duotone/presets/     - Tone presets");

    Ok(())
}

fn init_into(duotone_dir: &Path, config_path: &Path, force: bool) -> Result<(), String> {
    let presets_dir = duotone_dir.join("presets");
    std::fs::create_dir_all(&presets_dir)
        .map_err(|e| format!("Failed to create presets directory: {}", e))?;

    if !config_path.exists() || force {
        save_config(&DuotoneConfig::default(), config_path)?;
        println!("  Wrote: {}", file_label(config_path));
    } else {
        println!(
            "  Skipped: {} (already exists, use --force to overwrite)",
            file_label(config_path)
        );
    }

    for (slug, preset) in builtin_presets() {
        let path = presets_dir.join(format!("{}.yml", slug));
        if !path.exists() || force {
            save_tone_preset(&preset, &path)?;
            println!("  Wrote: presets/{}", file_label(&path));
        } else {
            println!("  Skipped: presets/{} (exists)", file_label(&path));
        }
    }

    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
