//! Shared utilities for duotone-cli
//!
//! Argument parsing, input discovery, and the per-file processing step used
//! by the `filter` and `batch` commands.

pub mod parsers;
pub mod processing;
pub mod types;

// Re-export commonly used items at the crate root for convenience
pub use parsers::{parse_filter_mode, parse_format, parse_quality, parse_tone};
pub use processing::{
    determine_output_path, expand_inputs, output_format, plan_outputs, process_single_image,
    SUPPORTED_EXTENSIONS,
};
pub use types::ProcessingParams;
