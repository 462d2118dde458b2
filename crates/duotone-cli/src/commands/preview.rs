use std::path::PathBuf;

use duotone_cli::{determine_output_path, output_format, parse_filter_mode, parse_tone};
use duotone_core::config::DuotoneConfig;
use duotone_core::exporters::write_encoded;
use duotone_core::models::ContainerFormat;
use duotone_core::render::Renderer;

/// Render a downsampled PNG preview of one image.
///
/// The preview goes to `<stem>_<mode>_preview.png` unless `--out` says
/// otherwise.
#[allow(clippy::too_many_arguments)]
pub fn cmd_preview(
    config: &DuotoneConfig,
    input: PathBuf,
    out: Option<PathBuf>,
    mode: Option<String>,
    brightness: Option<i32>,
    contrast: Option<i32>,
    max_dimension: Option<u32>,
    silent: bool,
) -> Result<(), String> {
    let mode = match mode {
        Some(m) => parse_filter_mode(&m)?,
        None => config.default_mode,
    };
    let tone = parse_tone(brightness, contrast, config.default_tone)?;
    let max_dimension = max_dimension.unwrap_or(config.preview_max_dimension);
    // Previews are always PNG; refuse `-o preview.jpg` up front
    output_format(&out, Some(ContainerFormat::Png), ContainerFormat::Png)?;

    let source = std::fs::read(&input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let renderer = Renderer::new(config.clone());
    let preview = renderer.render_preview(&source, mode, tone, max_dimension)?;

    let suffix = format!("{}_preview", mode.as_str());
    let output_path = determine_output_path(&input, &out, &suffix, ContainerFormat::Png)?;
    write_encoded(&preview, &output_path)?;

    if !silent {
        println!(
            "Preview {}x{} written to {}",
            preview.width,
            preview.height,
            output_path.display()
        );
    } else {
        println!("{}", output_path.display());
    }

    Ok(())
}
