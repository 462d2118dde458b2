//! Pixel transform engine
//!
//! Maps an RGBA raster to a grayscale, sepia or thresholded raster of the
//! same size. Alpha is never touched.
//!
//! Rounding: fractional channel values are rounded half-up, then clamped to
//! [0, 255].

mod luma;
mod transform;


pub use transform::{transform, transform_in_place, transform_pixel};

/// Pivot for the contrast curve.
pub(crate) const MID_GRAY: f32 = 128.0;

/// High-contrast mode emits white only for luma strictly above this.
pub(crate) const THRESHOLD: u32 = 128;

#[inline]
pub(crate) fn round_to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}
