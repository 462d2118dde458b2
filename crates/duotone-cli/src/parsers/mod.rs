//! Parsing functions for CLI arguments.

mod base;

pub use base::{parse_filter_mode, parse_format, parse_quality, parse_tone};
