//! In-memory RGBA8 raster.

use crate::error::{Result, ToneError};

/// Bytes per pixel: red, green, blue, alpha.
pub const CHANNELS: usize = 4;

/// A width × height grid of RGBA8 pixels stored row-major in one buffer.
///
/// The buffer length always equals `width * height * 4`; the constructor is
/// the only way in and it enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an existing RGBA8 buffer.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(ToneError::invalid(format!(
                "buffer size mismatch for {}x{} RGBA image: expected {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create an image with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = expected_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True when either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at (x, y), or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.data[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Iterate pixels as 4-byte slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Megapixels, for size-limit checks.
    pub fn megapixels(&self) -> f64 {
        self.pixel_count() as f64 / 1_000_000.0
    }
}

fn expected_len(width: u32, height: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| ToneError::invalid(format!("image dimensions {}x{} overflow", width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_buffer() {
        let image = RasterImage::new(2, 3, vec![0; 24]).unwrap();
        assert_eq!(image.dimensions(), (2, 3));
        assert_eq!(image.pixel_count(), 6);
        assert!(!image.is_empty());
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = RasterImage::new(2, 2, vec![0; 15]);
        match result {
            Err(ToneError::InvalidArgument(msg)) => {
                assert!(msg.contains("expected 16 bytes, got 15"), "{}", msg)
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_filled_and_pixel_lookup() {
        let image = RasterImage::filled(3, 2, [10, 20, 30, 40]).unwrap();
        assert_eq!(image.as_bytes().len(), 24);
        assert_eq!(image.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(image.pixel(3, 0), None);
        assert_eq!(image.pixels().count(), 6);
    }

    #[test]
    fn test_zero_area_is_empty() {
        let image = RasterImage::new(0, 5, Vec::new()).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.pixel_count(), 0);
    }
}
