use std::path::PathBuf;
use std::time::Instant;

use duotone_cli::{determine_output_path, output_format, process_single_image, ProcessingParams};
use duotone_core::config::DuotoneConfig;
use duotone_core::presets::load_tone_preset;
use duotone_core::render::Renderer;

/// Command-line arguments for `duotone filter`.
pub struct FilterArgs {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub mode: Option<String>,
    pub brightness: Option<i32>,
    pub contrast: Option<i32>,
    pub format: Option<String>,
    pub quality: Option<u8>,
    pub preset: Option<PathBuf>,
    pub silent: bool,
    pub verbose: bool,
}

/// Execute the filter command for a single image.
///
/// Decodes the input, applies the filter at full resolution, and writes the
/// export next to the input (or into `--out`).
pub fn cmd_filter(config: &DuotoneConfig, args: FilterArgs) -> Result<(), String> {
    let start_time = Instant::now();

    let preset = match &args.preset {
        Some(path) => {
            if !args.silent {
                println!("Loading tone preset from {}...", path.display());
            }
            Some(load_tone_preset(path)?)
        }
        None => None,
    };

    let mut params = ProcessingParams::resolve(
        config,
        preset.as_ref(),
        args.mode.as_deref(),
        args.brightness,
        args.contrast,
        args.format.as_deref(),
        args.quality,
    )?;
    params.silent = args.silent;
    params.verbose = args.verbose;

    // `-o final.jpg` decides the container unless --format says otherwise
    let explicit_format = args.format.as_ref().map(|_| params.format);
    params.format = output_format(&args.out, explicit_format, params.format)?;

    let output_path =
        determine_output_path(&args.input, &args.out, params.output_suffix(), params.format)?;

    if !args.silent {
        println!(
            "Filtering {} ({}, brightness {}%, contrast {}%)...",
            args.input.display(),
            params.mode,
            params.tone.brightness_percent,
            params.tone.contrast_percent
        );
    }

    let renderer = Renderer::new(config.clone());
    let written = process_single_image(&args.input, &output_path, &renderer, &params)?;

    if !args.silent {
        println!(
            "Exported {} in {:.2}s",
            written.display(),
            start_time.elapsed().as_secs_f64()
        );
    } else {
        println!("{}", written.display());
    }

    Ok(())
}
