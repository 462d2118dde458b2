use std::path::PathBuf;

use duotone_cli::{determine_output_path, output_format, parse_format, parse_quality};
use duotone_core::config::DuotoneConfig;
use duotone_core::exporters::write_encoded;
use duotone_core::render::Renderer;

/// Re-encode one image in another container without filtering it.
pub fn cmd_convert(
    config: &DuotoneConfig,
    input: PathBuf,
    to: String,
    from: Option<String>,
    out: Option<PathBuf>,
    quality: Option<u8>,
    silent: bool,
) -> Result<(), String> {
    let target = parse_format(&to)?;
    let target = output_format(&out, Some(target), target)?;
    let hint = from.as_deref().map(parse_format).transpose()?;
    let quality = parse_quality(quality)?;

    let source = std::fs::read(&input)
        .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let renderer = Renderer::new(config.clone());
    let encoded = renderer.convert_format(&source, hint, target, quality)?;

    let output_path = determine_output_path(&input, &out, "converted", target)?;
    write_encoded(&encoded, &output_path)?;

    if !silent {
        println!(
            "Converted {} -> {} ({} bytes)",
            input.display(),
            output_path.display(),
            encoded.len()
        );
        if let Some(q) = encoded.quality {
            println!("  {} quality: {}", target, q);
        }
    } else {
        println!("{}", output_path.display());
    }

    Ok(())
}
