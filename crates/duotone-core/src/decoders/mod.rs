//! Image decoders
//!
//! Turns PNG, JPEG, WebP, BMP and GIF bytes into an RGBA8 [`RasterImage`].
//! The container is sniffed from magic bytes first; the caller's format hint
//! is only used when sniffing fails, so files with a wrong extension still
//! decode.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::{Result, ToneError};
use crate::models::{ContainerFormat, RasterImage};


/// Decoded image data
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// RGBA8 pixels
    pub raster: RasterImage,

    /// Container the bytes were decoded as
    pub source_format: ContainerFormat,

    /// Whether the source stored a single luminance channel
    pub source_is_grayscale: bool,

    /// Whether the source carried an alpha channel
    pub source_has_alpha: bool,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn into_raster(self) -> RasterImage {
        self.raster
    }
}

/// Sniff the container format from magic bytes.
pub fn detect_format(bytes: &[u8]) -> Option<ContainerFormat> {
    image::guess_format(bytes)
        .ok()
        .and_then(ContainerFormat::from_image_format)
}

/// Read the pixel dimensions from the image header without decoding the
/// pixel data.
///
/// # Errors
/// Same as [`decode_image_from_bytes`].
pub fn read_dimensions(bytes: &[u8], hint: Option<ContainerFormat>) -> Result<(u32, u32)> {
    let format = resolve_format(bytes, hint)?;
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.image_format());
    reader
        .into_dimensions()
        .map_err(|e| ToneError::Decode(format!("{} header is invalid: {}", format, e)))
}

/// Decode an image held in memory.
///
/// # Errors
/// `Decode` when the bytes are empty, unrecognized, or corrupt;
/// `UnsupportedFormat` when they are a container we do not handle (TIFF,
/// ICO, ...).
pub fn decode_image_from_bytes(
    bytes: &[u8],
    hint: Option<ContainerFormat>,
) -> Result<DecodedImage> {
    let format = resolve_format(bytes, hint)?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.image_format());
    let dynamic = reader
        .decode()
        .map_err(|e| ToneError::Decode(format!("{} data is invalid: {}", format, e)))?;

    log::debug!(
        "decoded {} source: {}x{} {:?}",
        format,
        dynamic.width(),
        dynamic.height(),
        dynamic.color()
    );

    into_decoded(dynamic, format)
}

/// Decode an image file. The extension serves as the format hint.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| ToneError::io(format!("Failed to read {}", path.display()), e))?;
    let hint = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ContainerFormat::from_extension);
    decode_image_from_bytes(&bytes, hint)
}

/// Magic bytes first, then the caller's hint.
fn resolve_format(bytes: &[u8], hint: Option<ContainerFormat>) -> Result<ContainerFormat> {
    if bytes.is_empty() {
        return Err(ToneError::Decode("source is empty".to_string()));
    }

    match image::guess_format(bytes) {
        Ok(sniffed) => ContainerFormat::from_image_format(sniffed).ok_or_else(|| {
            ToneError::UnsupportedFormat(format!("{:?} sources are not supported", sniffed))
        }),
        Err(_) => hint.ok_or_else(|| {
            ToneError::Decode(
                "unrecognized image data (expected PNG, JPEG, WebP, BMP or GIF)".to_string(),
            )
        }),
    }
}

fn into_decoded(dynamic: DynamicImage, format: ContainerFormat) -> Result<DecodedImage> {
    let color = dynamic.color();
    let rgba = dynamic.into_rgba8();
    let (width, height) = rgba.dimensions();
    let raster = RasterImage::new(width, height, rgba.into_raw())?;

    Ok(DecodedImage {
        raster,
        source_format: format,
        source_is_grayscale: !color.has_color(),
        source_has_alpha: color.has_alpha(),
    })
}
