//! Duotone Core Library
//!
//! Monochrome and sepia tone mapping for RGBA images: pixel transforms,
//! codec plumbing, and preview/export orchestration.

pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod models;
pub mod parallel;
pub mod pipeline;
pub mod presets;
pub mod render;

// Re-export commonly used types
pub use error::{Result, ToneError};
pub use models::{
    ContainerFormat, EncodedImage, FilterMode, RasterImage, TonePreset, ToneParameters,
};
pub use pipeline::{transform, transform_in_place, transform_pixel};
pub use render::{
    convert_format, render_export, render_preview, RenderTicket, RenderTracker, Renderer,
};
