//! Preview/export orchestration
//!
//! Glue between raw source bytes and the transform engine: decode, size
//! checks, preview downsampling, transform, and re-encoding. Every call is
//! an independent request; nothing is cached between calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::config::DuotoneConfig;
use crate::decoders::{decode_image_from_bytes, read_dimensions, DecodedImage};
use crate::error::{Result, ToneError};
use crate::exporters::encode_raster;
use crate::models::{ContainerFormat, EncodedImage, FilterMode, RasterImage, ToneParameters};
use crate::pipeline::transform_in_place;

/// Runs render requests against a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: DuotoneConfig,
}

impl Renderer {
    pub fn new(config: DuotoneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DuotoneConfig {
        &self.config
    }

    /// Decode, shrink so neither side exceeds `max_dimension`, filter, and
    /// encode as PNG.
    pub fn render_preview(
        &self,
        source: &[u8],
        mode: FilterMode,
        tone: ToneParameters,
        max_dimension: u32,
    ) -> Result<EncodedImage> {
        let started = Instant::now();
        let raster = self.preview_raster(source, max_dimension)?;
        let encoded = finish_preview(raster, mode, tone)?;
        log::debug!(
            "preview {} {}x{} in {:.1}ms",
            mode,
            encoded.width,
            encoded.height,
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(encoded)
    }

    /// Preview render that gives up once a newer request has been issued on
    /// `tracker`. Returns `Ok(None)` for a superseded request.
    pub fn render_preview_latest(
        &self,
        tracker: &RenderTracker,
        ticket: RenderTicket,
        source: &[u8],
        mode: FilterMode,
        tone: ToneParameters,
        max_dimension: u32,
    ) -> Result<Option<EncodedImage>> {
        if !tracker.is_current(ticket) {
            log::debug!("skipping stale preview request {:?}", ticket);
            return Ok(None);
        }
        let raster = self.preview_raster(source, max_dimension)?;
        if !tracker.is_current(ticket) {
            log::debug!("abandoning stale preview request {:?} after decode", ticket);
            return Ok(None);
        }
        let encoded = finish_preview(raster, mode, tone)?;
        if !tracker.is_current(ticket) {
            log::debug!("dropping stale preview result {:?}", ticket);
            return Ok(None);
        }
        Ok(Some(encoded))
    }

    /// Full-resolution filter and encode. `quality` falls back to the
    /// configured default for lossy formats and is ignored for the rest.
    pub fn render_export(
        &self,
        source: &[u8],
        mode: FilterMode,
        tone: ToneParameters,
        format: ContainerFormat,
        quality: Option<u8>,
    ) -> Result<EncodedImage> {
        let started = Instant::now();
        let mut raster = self.decode(source, None)?.into_raster();
        transform_in_place(&mut raster, mode, tone)?;
        let encoded = encode_raster(&raster, format, quality.or(self.config.quality_for(format)))?;
        log::debug!(
            "export {} -> {} {}x{} ({} bytes) in {:.1}ms",
            mode,
            format,
            encoded.width,
            encoded.height,
            encoded.len(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        Ok(encoded)
    }

    /// Re-encode without filtering.
    pub fn convert_format(
        &self,
        source: &[u8],
        source_hint: Option<ContainerFormat>,
        target: ContainerFormat,
        quality: Option<u8>,
    ) -> Result<EncodedImage> {
        let decoded = self.decode(source, source_hint)?;
        let from = decoded.source_format;
        let encoded = encode_raster(
            &decoded.into_raster(),
            target,
            quality.or(self.config.quality_for(target)),
        )?;
        log::debug!("converted {} -> {} ({} bytes)", from, target, encoded.len());
        Ok(encoded)
    }

    /// Decode and downsample: the part of a preview that does not depend on
    /// the filter settings.
    fn preview_raster(&self, source: &[u8], max_dimension: u32) -> Result<RasterImage> {
        if max_dimension == 0 {
            return Err(ToneError::invalid("preview max dimension must be positive"));
        }
        let decoded = self.decode(source, None)?;
        downsample(decoded.raster, max_dimension)
    }

    /// Decode after checking the header dimensions against the megapixel
    /// cap, so oversized sources are refused before any pixel allocation.
    fn decode(&self, source: &[u8], hint: Option<ContainerFormat>) -> Result<DecodedImage> {
        let (width, height) = read_dimensions(source, hint)?;
        let megapixels = width as f64 * height as f64 / 1_000_000.0;
        if megapixels > self.config.max_megapixels as f64 {
            return Err(ToneError::invalid(format!(
                "image too large: {}x{} is {:.1} MP (max {} MP)",
                width, height, megapixels, self.config.max_megapixels
            )));
        }
        decode_image_from_bytes(source, hint)
    }
}

fn finish_preview(
    mut raster: RasterImage,
    mode: FilterMode,
    tone: ToneParameters,
) -> Result<EncodedImage> {
    transform_in_place(&mut raster, mode, tone)?;
    encode_raster(&raster, ContainerFormat::Png, None)
}

/// Render a preview with the default configuration.
pub fn render_preview(
    source: &[u8],
    mode: FilterMode,
    tone: ToneParameters,
    max_dimension: u32,
) -> Result<EncodedImage> {
    Renderer::default().render_preview(source, mode, tone, max_dimension)
}

/// Render a full-resolution export with the default configuration.
pub fn render_export(
    source: &[u8],
    mode: FilterMode,
    tone: ToneParameters,
    format: ContainerFormat,
    quality: Option<u8>,
) -> Result<EncodedImage> {
    Renderer::default().render_export(source, mode, tone, format, quality)
}

/// Convert between container formats with the default configuration.
pub fn convert_format(
    source: &[u8],
    source_hint: Option<ContainerFormat>,
    target: ContainerFormat,
    quality: Option<u8>,
) -> Result<EncodedImage> {
    Renderer::default().convert_format(source, source_hint, target, quality)
}

/// Target size for a preview: the longest side becomes `max_dimension`, the
/// other side keeps the aspect ratio (rounded, at least 1). Images already
/// within the cap keep their size.
pub fn preview_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension || longest == 0 {
        return (width, height);
    }
    let scale = |side: u32| -> u32 {
        let scaled = (side as u64 * max_dimension as u64 + longest as u64 / 2) / longest as u64;
        (scaled as u32).max(1)
    };
    if width >= height {
        (max_dimension, scale(height))
    } else {
        (scale(width), max_dimension)
    }
}

/// Shrink `raster` to fit within `max_dimension` with bilinear filtering.
pub fn downsample(raster: RasterImage, max_dimension: u32) -> Result<RasterImage> {
    if max_dimension == 0 {
        return Err(ToneError::invalid("preview max dimension must be positive"));
    }
    let (width, height) = raster.dimensions();
    let (new_width, new_height) = preview_dimensions(width, height, max_dimension);
    if (new_width, new_height) == (width, height) {
        return Ok(raster);
    }

    let source = RgbaImage::from_raw(width, height, raster.into_bytes())
        .ok_or_else(|| ToneError::invalid("raster buffer does not match its dimensions"))?;
    let resized = imageops::resize(&source, new_width, new_height, FilterType::Triangle);
    RasterImage::new(new_width, new_height, resized.into_raw())
}

/// Identifies one request issued on a [`RenderTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Last-request-wins bookkeeping for interactive previews.
///
/// Each parameter change calls [`RenderTracker::begin`]; a render holding an
/// older ticket is stale and can be dropped.
#[derive(Debug, Default)]
pub struct RenderTracker {
    latest: AtomicU64,
}

impl RenderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding all earlier ones.
    pub fn begin(&self) -> RenderTicket {
        RenderTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
