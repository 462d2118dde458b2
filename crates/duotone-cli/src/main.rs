use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{
    cmd_batch, cmd_convert, cmd_filter, cmd_init, cmd_preset_create, cmd_preset_list,
    cmd_preset_show, cmd_preview, BatchArgs, FilterArgs,
};

#[derive(Parser)]
#[command(name = "duotone")]
#[command(version, about = "Black & white and sepia image filter", long_about = None)]
struct Cli {
    /// Config file (overrides $DUOTONE_CONFIG and the default search paths)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long, global = true)]
    silent: bool,

    /// Print details and enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a filter to one image at full resolution
    Filter {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory or file
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Filter mode: grayscale, luminosity, average, sepia, high-contrast
        #[arg(short, long, value_name = "MODE")]
        mode: Option<String>,

        /// Brightness percent (50-150, 100 = unchanged)
        #[arg(short, long, value_name = "PERCENT")]
        brightness: Option<i32>,

        /// Contrast percent (50-150, 100 = unchanged)
        #[arg(short, long, value_name = "PERCENT")]
        contrast: Option<i32>,

        /// Export format: png, jpeg, webp, bmp, gif
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Quality for jpeg/webp (1-100)
        #[arg(short, long, value_name = "N")]
        quality: Option<u8>,

        /// Tone preset file (mode and tone; flags still override)
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,
    },

    /// Render a downsampled PNG preview
    Preview {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory or file
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Filter mode: grayscale, luminosity, average, sepia, high-contrast
        #[arg(short, long, value_name = "MODE")]
        mode: Option<String>,

        /// Brightness percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        brightness: Option<i32>,

        /// Contrast percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        contrast: Option<i32>,

        /// Longest side of the preview in pixels
        #[arg(long, value_name = "PIXELS")]
        max_dimension: Option<u32>,
    },

    /// Re-encode an image in another format without filtering
    Convert {
        /// Input file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Target format: png, jpeg, webp, bmp, gif
        #[arg(long, value_name = "FORMAT")]
        to: String,

        /// Source format hint, used when the bytes are not recognized
        #[arg(long, value_name = "FORMAT")]
        from: Option<String>,

        /// Output directory or file
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Quality for jpeg/webp (1-100)
        #[arg(short, long, value_name = "N")]
        quality: Option<u8>,
    },

    /// Filter many files in parallel with shared settings
    Batch {
        /// Input files or directories
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Scan subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Filter mode: grayscale, luminosity, average, sepia, high-contrast
        #[arg(short, long, value_name = "MODE")]
        mode: Option<String>,

        /// Brightness percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        brightness: Option<i32>,

        /// Contrast percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        contrast: Option<i32>,

        /// Export format: png, jpeg, webp, bmp, gif
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Quality for jpeg/webp (1-100)
        #[arg(short, long, value_name = "N")]
        quality: Option<u8>,

        /// Tone preset file
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Manage tone presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Write a default config and the built-in presets to ~/duotone
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List presets in a directory (default: ~/duotone/presets)
    List {
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show a preset by file path or name
    Show {
        #[arg(value_name = "PRESET")]
        preset: String,
    },

    /// Create a new preset file
    Create {
        /// Output file
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Preset name
        #[arg(short, long)]
        name: String,

        /// Filter mode
        #[arg(short, long, value_name = "MODE")]
        mode: Option<String>,

        /// Brightness percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        brightness: Option<i32>,

        /// Contrast percent (50-150)
        #[arg(short, long, value_name = "PERCENT")]
        contrast: Option<i32>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let handle = duotone_core::config::load_config(cli.config.as_deref());
    for warning in &handle.warnings {
        log::warn!("{}", warning);
    }
    if cli.verbose {
        match &handle.source {
            Some(path) => println!("Using config: {}", path.display()),
            None => println!("Using built-in config defaults"),
        }
    }
    let config = handle.config;
    let (silent, verbose) = (cli.silent, cli.verbose);

    let result = match cli.command {
        Commands::Filter {
            input,
            out,
            mode,
            brightness,
            contrast,
            format,
            quality,
            preset,
        } => cmd_filter(
            &config,
            FilterArgs {
                input,
                out,
                mode,
                brightness,
                contrast,
                format,
                quality,
                preset,
                silent,
                verbose,
            },
        ),

        Commands::Preview {
            input,
            out,
            mode,
            brightness,
            contrast,
            max_dimension,
        } => cmd_preview(
            &config,
            input,
            out,
            mode,
            brightness,
            contrast,
            max_dimension,
            silent,
        ),

        Commands::Convert {
            input,
            to,
            from,
            out,
            quality,
        } => cmd_convert(&config, input, to, from, out, quality, silent),

        Commands::Batch {
            inputs,
            recursive,
            mode,
            brightness,
            contrast,
            format,
            quality,
            preset,
            out,
            threads,
        } => cmd_batch(
            &config,
            BatchArgs {
                inputs,
                recursive,
                mode,
                brightness,
                contrast,
                format,
                quality,
                preset,
                out,
                threads,
                silent,
                verbose,
            },
        ),

        Commands::Preset { action } => match action {
            PresetAction::List { dir } => cmd_preset_list(dir),
            PresetAction::Show { preset } => cmd_preset_show(preset),
            PresetAction::Create {
                output,
                name,
                mode,
                brightness,
                contrast,
            } => cmd_preset_create(output, name, mode, brightness, contrast),
        },

        Commands::Init { force } => cmd_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
