//! Image exporters for the supported container formats
//!
//! Encode an RGBA8 raster to PNG, JPEG, WebP, BMP or GIF bytes, and write
//! encoded images to disk.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{Result, ToneError};
use crate::models::{ContainerFormat, EncodedImage, RasterImage, CHANNELS};
use crate::parallel::{fold_chunks, PARALLEL_THRESHOLD};

/// JPEG quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
/// WebP quality used when the caller does not pick one (100 = lossless).
pub const DEFAULT_WEBP_QUALITY: u8 = 100;

/// Default quality for a format, or `None` when the format is lossless.
pub fn default_quality(format: ContainerFormat) -> Option<u8> {
    match format {
        ContainerFormat::Jpeg => Some(DEFAULT_JPEG_QUALITY),
        ContainerFormat::WebP => Some(DEFAULT_WEBP_QUALITY),
        _ => None,
    }
}

/// Check a quality value. Only meaningful for lossy formats.
pub fn validate_quality(quality: u8) -> Result<()> {
    if !(1..=100).contains(&quality) {
        return Err(ToneError::invalid(format!(
            "quality {} must be in range [1, 100]",
            quality
        )));
    }
    Ok(())
}

/// Encode `raster` as `format`.
///
/// `quality` applies to JPEG and WebP only and falls back to the format
/// default when `None`; other formats ignore it.
///
/// JPEG has no alpha channel, so alpha is dropped. WebP is written with the
/// lossless encoder; a quality below 100 first quantizes RGB to fewer levels.
///
/// # Errors
/// `InvalidArgument` for a lossy quality outside [1, 100]; `Encode` for a
/// zero-area raster or an encoder failure.
pub fn encode_raster(
    raster: &RasterImage,
    format: ContainerFormat,
    quality: Option<u8>,
) -> Result<EncodedImage> {
    let quality = if format.is_lossy() {
        let q = quality.or_else(|| default_quality(format)).unwrap_or(100);
        validate_quality(q)?;
        Some(q)
    } else {
        None
    };

    if raster.is_empty() {
        return Err(ToneError::encode(
            format,
            format!(
                "cannot encode a {}x{} image",
                raster.width(),
                raster.height()
            ),
        ));
    }

    let (width, height) = raster.dimensions();
    let mut buffer = Vec::new();

    match format {
        ContainerFormat::Jpeg => {
            if has_transparency(raster) {
                log::debug!("JPEG has no alpha channel; transparency will be dropped");
            }
            let rgb = to_dynamic(raster, format)?.to_rgb8();
            let encoder = JpegEncoder::new_with_quality(
                Cursor::new(&mut buffer),
                quality.unwrap_or(DEFAULT_JPEG_QUALITY),
            );
            encoder
                .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                .map_err(|e| ToneError::encode(format, e))?;
        }
        ContainerFormat::WebP => {
            let mut rgba = raster.as_bytes().to_vec();
            quantize_rgb(&mut rgba, quality.unwrap_or(DEFAULT_WEBP_QUALITY));
            let encoder = WebPEncoder::new_lossless(Cursor::new(&mut buffer));
            encoder
                .write_image(&rgba, width, height, ExtendedColorType::Rgba8)
                .map_err(|e| ToneError::encode(format, e))?;
        }
        ContainerFormat::Png | ContainerFormat::Bmp | ContainerFormat::Gif => {
            to_dynamic(raster, format)?
                .write_to(&mut Cursor::new(&mut buffer), format.image_format())
                .map_err(|e| ToneError::encode(format, e))?;
        }
    }

    Ok(EncodedImage {
        bytes: buffer,
        format,
        quality,
        width,
        height,
    })
}

/// Write encoded bytes to `path`, creating or truncating the file.
pub fn write_encoded<P: AsRef<Path>>(encoded: &EncodedImage, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, &encoded.bytes).map_err(|e| {
        ToneError::io(
            format!("Failed to write {} file {}", encoded.format, path.display()),
            e,
        )
    })
}

/// Whether any pixel is less than fully opaque.
pub fn has_transparency(raster: &RasterImage) -> bool {
    fold_chunks(
        raster.as_bytes(),
        CHANNELS,
        PARALLEL_THRESHOLD,
        || false,
        |acc, px| acc || px[3] < 255,
        |a, b| a || b,
    )
}

fn to_dynamic(raster: &RasterImage, format: ContainerFormat) -> Result<DynamicImage> {
    RgbaImage::from_raw(raster.width(), raster.height(), raster.as_bytes().to_vec())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| ToneError::encode(format, "raster buffer does not match its dimensions"))
}

/// Snap RGB to a coarser set of levels so the lossless WebP encoder can
/// compress harder. Quality 100 leaves the data untouched.
fn quantize_rgb(rgba: &mut [u8], quality: u8) {
    if quality >= 100 {
        return;
    }
    let levels = levels_for_quality(quality);
    let step = 255.0 / (levels as f32 - 1.0);
    for px in rgba.chunks_exact_mut(CHANNELS) {
        for channel in px.iter_mut().take(3) {
            let bucket = (*channel as f32 / step).round();
            *channel = (bucket * step).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Quadratic in quality: high qualities keep fine gradations, low ones
/// collapse toward a handful of levels.
fn levels_for_quality(quality: u8) -> u16 {
    if quality >= 100 {
        return 256;
    }
    let normalized = (quality as f32).clamp(1.0, 100.0) / 100.0;
    let levels = 2.0 + normalized * normalized * 254.0;
    levels.round().clamp(2.0, 256.0) as u16
}
