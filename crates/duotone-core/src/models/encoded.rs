//! Encoded output handed back to callers.

use super::ContainerFormat;

/// Bytes of an encoded image plus the format tag they were written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ContainerFormat,
    /// Quality used for lossy formats; `None` for lossless ones.
    pub quality: Option<u8>,
    pub width: u32,
    pub height: u32,
}

impl EncodedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
