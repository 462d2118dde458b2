//! Type definitions for CLI.

mod params;

pub use params::ProcessingParams;
