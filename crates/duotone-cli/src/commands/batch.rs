use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use duotone_cli::{expand_inputs, plan_outputs, process_single_image, ProcessingParams};
use duotone_core::config::DuotoneConfig;
use duotone_core::presets::load_tone_preset;
use duotone_core::render::Renderer;

/// Command-line arguments for `duotone batch`.
pub struct BatchArgs {
    pub inputs: Vec<PathBuf>,
    pub recursive: bool,
    pub mode: Option<String>,
    pub brightness: Option<i32>,
    pub contrast: Option<i32>,
    pub format: Option<String>,
    pub quality: Option<u8>,
    pub preset: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub threads: Option<usize>,
    pub silent: bool,
    pub verbose: bool,
}

/// Filter every input with the same settings, in parallel.
///
/// A failing file is reported and skipped; the command fails only when
/// every file failed.
pub fn cmd_batch(config: &DuotoneConfig, args: BatchArgs) -> Result<(), String> {
    let batch_start = Instant::now();
    let silent = args.silent;

    if args.inputs.is_empty() {
        return Err("No input files or directories specified".to_string());
    }

    // Expand directories to file lists
    let inputs = expand_inputs(&args.inputs, args.recursive)?;

    if inputs.is_empty() {
        return Err(
            "No supported image files found (supported: .png, .jpg, .jpeg, .webp, .bmp, .gif)"
                .to_string(),
        );
    }

    if !silent {
        println!("Found {} image files to process", inputs.len());
    }

    // Configure thread pool if specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        if !silent {
            println!("Using {} threads for parallel processing", num_threads);
        }
    }

    // Outputs go beside each input unless -o names a directory
    if let Some(output_dir) = &args.out {
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir)
                .map_err(|e| format!("Failed to create output directory: {}", e))?;
        }
    }

    let preset = match &args.preset {
        Some(path) => {
            if !silent {
                println!("Loading tone preset from {}...", path.display());
            }
            Some(load_tone_preset(path)?)
        }
        None => None,
    };

    // Shared settings; per-image output is suppressed in batch mode
    let mut params = ProcessingParams::resolve(
        config,
        preset.as_ref(),
        args.mode.as_deref(),
        args.brightness,
        args.contrast,
        args.format.as_deref(),
        args.quality,
    )?;
    params.silent = true;
    params.verbose = args.verbose;

    let renderer = Renderer::new(config.clone());

    if !silent {
        println!(
            "\nProcessing {} files in parallel ({}, {})...\n",
            inputs.len(),
            params.mode,
            params.format
        );
    }

    // Progress tracking
    let processed_count = AtomicUsize::new(0);
    let total_files = inputs.len();

    // Resolve every output path up front so two inputs never share one
    let planned = plan_outputs(&inputs, &args.out, params.output_suffix(), params.format);

    let results: Vec<Result<(PathBuf, f64), String>> = inputs
        .par_iter()
        .zip(planned.par_iter())
        .map(|(input, planned_path)| {
            let file_start = Instant::now();

            let output_path = planned_path.clone()?;
            process_single_image(input, &output_path, &renderer, &params)?;

            let file_elapsed = file_start.elapsed().as_secs_f64();

            let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            if !silent {
                println!(
                    "[{}/{}] {} -> {} ({:.2}s)",
                    count,
                    total_files,
                    input.display(),
                    output_path.display(),
                    file_elapsed
                );
            } else {
                println!("{}", output_path.display());
            }

            Ok((output_path, file_elapsed))
        })
        .collect();

    // Summarize results
    let mut success_count = 0;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for (input, result) in inputs.iter().zip(results.iter()) {
        match result {
            Ok(_) => success_count += 1,
            Err(e) => errors.push((input.clone(), e.clone())),
        }
    }

    let batch_elapsed = batch_start.elapsed();

    if !silent {
        println!("\n========================================");
        println!("BATCH PROCESSING COMPLETE");
        println!("========================================");
        println!("  Successful: {}", success_count);
        println!("  Failed:     {}", errors.len());
        match &args.out {
            Some(output_dir) => println!("  Output dir: {}", output_dir.display()),
            None => println!("  Output dir: (beside each input)"),
        }
        println!("  Total time: {:.2}s", batch_elapsed.as_secs_f64());
        if success_count > 0 {
            println!(
                "  Avg time:   {:.2}s per image",
                batch_elapsed.as_secs_f64() / success_count as f64
            );
        }
    }

    if !errors.is_empty() {
        eprintln!("\nErrors:");
        for (input, error) in &errors {
            eprintln!("  {}: {}", input.display(), error);
        }
    }

    if success_count == 0 {
        return Err("All files failed to process".to_string());
    }

    Ok(())
}
