//! Data models for the duotone pipeline.

mod encoded;
mod enums;
mod preset;
mod raster;
mod tone;

pub use encoded::EncodedImage;
pub use enums::{ContainerFormat, FilterMode};
pub use preset::TonePreset;
pub use raster::{RasterImage, CHANNELS};
pub use tone::{ToneParameters, TONE_PERCENT_MAX, TONE_PERCENT_MIN, TONE_PERCENT_NEUTRAL};
