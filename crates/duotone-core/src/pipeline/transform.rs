//! Per-pixel filter application.

use crate::error::{Result, ToneError};
use crate::models::{FilterMode, RasterImage, ToneParameters, CHANNELS};
use crate::parallel::{for_each_chunk_mut, PARALLEL_THRESHOLD};

use super::luma::{sepia, LumaWeights};
use super::{round_to_byte, MID_GRAY, THRESHOLD};

/// Resolved per-pixel operation. Built once per transform so the hot loop
/// only matches on an enum.
#[derive(Debug, Clone, Copy)]
enum PixelKernel {
    /// Tone at 100%/100%: output is the rounded luma itself.
    Luma(LumaWeights),
    /// Luma followed by brightness then contrast.
    Toned {
        weights: LumaWeights,
        brightness: f32,
        contrast: f32,
    },
    Threshold(LumaWeights),
    Sepia,
}

impl PixelKernel {
    fn new(mode: FilterMode, tone: ToneParameters) -> Self {
        let Some(weights) = LumaWeights::for_mode(mode) else {
            return PixelKernel::Sepia;
        };
        if mode == FilterMode::HighContrastBw {
            PixelKernel::Threshold(weights)
        } else if tone.is_neutral() {
            PixelKernel::Luma(weights)
        } else {
            PixelKernel::Toned {
                weights,
                brightness: tone.brightness_factor(),
                contrast: tone.contrast_factor(),
            }
        }
    }

    #[inline]
    fn apply(self, px: &mut [u8]) {
        let (r, g, b) = (px[0], px[1], px[2]);
        let gray = match self {
            PixelKernel::Sepia => {
                px[..3].copy_from_slice(&sepia(r, g, b));
                return;
            }
            PixelKernel::Threshold(weights) => {
                if weights.luma(r, g, b).exceeds(THRESHOLD) {
                    255
                } else {
                    0
                }
            }
            PixelKernel::Luma(weights) => weights.luma(r, g, b).rounded(),
            PixelKernel::Toned {
                weights,
                brightness,
                contrast,
            } => {
                let gray = weights.luma(r, g, b).value() * brightness;
                round_to_byte(contrast * (gray - MID_GRAY) + MID_GRAY)
            }
        };
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

/// Apply `mode` to every pixel of `image`, returning a new image with the
/// same dimensions and alpha channel.
///
/// Brightness and contrast only affect the grayscale, luminosity and
/// average modes; sepia and high-contrast ignore them.
///
/// # Errors
/// `InvalidArgument` when the image has zero width or height, or when a
/// tone value lies outside [50, 150].
pub fn transform(image: &RasterImage, mode: FilterMode, tone: ToneParameters) -> Result<RasterImage> {
    let mut output = image.clone();
    transform_in_place(&mut output, mode, tone)?;
    Ok(output)
}

/// Same as [`transform`] but rewrites `image` in place.
pub fn transform_in_place(
    image: &mut RasterImage,
    mode: FilterMode,
    tone: ToneParameters,
) -> Result<()> {
    if image.is_empty() {
        return Err(ToneError::invalid(format!(
            "cannot filter a {}x{} image",
            image.width(),
            image.height()
        )));
    }
    tone.validate()?;

    let kernel = PixelKernel::new(mode, tone);
    for_each_chunk_mut(
        image.as_bytes_mut(),
        CHANNELS,
        PARALLEL_THRESHOLD,
        |px| kernel.apply(px),
    );
    Ok(())
}

/// Filter a single RGBA pixel. Useful for swatches and tests.
pub fn transform_pixel(rgba: [u8; 4], mode: FilterMode, tone: ToneParameters) -> Result<[u8; 4]> {
    tone.validate()?;
    let mut px = rgba;
    PixelKernel::new(mode, tone).apply(&mut px);
    Ok(px)
}
