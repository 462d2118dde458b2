//! Single image processing.

use std::path::{Path, PathBuf};
use std::time::Instant;

use duotone_core::exporters::write_encoded;
use duotone_core::render::Renderer;

use crate::types::ProcessingParams;

/// Filter one file at full resolution and write the export to `output_path`.
///
/// Creates the output's parent directory when missing.
pub fn process_single_image(
    input: &Path,
    output_path: &Path,
    renderer: &Renderer,
    params: &ProcessingParams,
) -> Result<PathBuf, String> {
    let start = Instant::now();
    let source = std::fs::read(input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let encoded =
        renderer.render_export(&source, params.mode, params.tone, params.format, params.quality)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }
    write_encoded(&encoded, output_path)?;

    if params.verbose && !params.silent {
        println!(
            "  {} {}x{}, {} bytes in {:.2}s",
            params.mode,
            encoded.width,
            encoded.height,
            encoded.len(),
            start.elapsed().as_secs_f64()
        );
    }
    log::debug!("wrote {}", output_path.display());

    Ok(output_path.to_path_buf())
}
