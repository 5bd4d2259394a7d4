//! Compressors used by the share-link schemes.
//!
//! Each compressor owns the text encoding it works on: LZMA compresses the
//! UTF-8 bytes of a snippet, LZ-string works on UTF-16 code units, and the
//! legacy scheme stores UTF-8 as-is.

use crate::error::{PlaygroundError, Result};

/// A fallible, lossless text compressor.
pub trait Compressor: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Compress a snippet into a payload.
    fn compress(&self, text: &str) -> Result<Vec<u8>>;

    /// Recover the snippet from a payload.
    fn decompress(&self, payload: &[u8]) -> Result<String>;
}

/// Default cap on the LZMA dictionary buffer while decoding untrusted links.
pub const DEFAULT_LZMA_MEMLIMIT: usize = 16 * 1024 * 1024;

/// `.lzma` (LZMA-alone) compression of the snippet's UTF-8 bytes.
#[derive(Debug, Clone, Copy)]
pub struct Lzma {
    memlimit: usize,
}

impl Lzma {
    /// Create an LZMA compressor whose decoder refuses to allocate more than
    /// `memlimit` bytes of dictionary.
    pub fn new(memlimit: usize) -> Self {
        Self { memlimit }
    }
}

impl Default for Lzma {
    fn default() -> Self {
        Self::new(DEFAULT_LZMA_MEMLIMIT)
    }
}

impl Compressor for Lzma {
    fn name(&self) -> &'static str {
        "lzma"
    }

    fn compress(&self, text: &str) -> Result<Vec<u8>> {
        let mut input = text.as_bytes();
        let mut payload = Vec::new();
        lzma_rs::lzma_compress(&mut input, &mut payload)
            .map_err(|e| PlaygroundError::Compression(e.to_string()))?;
        Ok(payload)
    }

    fn decompress(&self, payload: &[u8]) -> Result<String> {
        let options = lzma_rs::decompress::Options {
            memlimit: Some(self.memlimit),
            ..Default::default()
        };
        let mut input = payload;
        let mut bytes = Vec::new();
        lzma_rs::lzma_decompress_with_options(&mut input, &mut bytes, &options)
            .map_err(|e| PlaygroundError::Decompression(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| PlaygroundError::Decompression(e.to_string()))
    }
}

/// LZ-string compression of the snippet's UTF-16 code units.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzString;

impl Compressor for LzString {
    fn name(&self) -> &'static str {
        "lz-string"
    }

    fn compress(&self, text: &str) -> Result<Vec<u8>> {
        Ok(lz_str::compress_to_uint8_array(text))
    }

    fn decompress(&self, payload: &[u8]) -> Result<String> {
        let units = lz_str::decompress_from_uint8_array(payload)
            .ok_or_else(|| PlaygroundError::Decompression("invalid lz-string payload".to_string()))?;
        String::from_utf16(&units).map_err(|e| PlaygroundError::Decompression(e.to_string()))
    }
}

/// No compression; the payload is the snippet's UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncompressed;

impl Compressor for Uncompressed {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn compress(&self, text: &str) -> Result<Vec<u8>> {
        Ok(text.as_bytes().to_vec())
    }

    fn decompress(&self, payload: &[u8]) -> Result<String> {
        String::from_utf8(payload.to_vec()).map_err(|e| PlaygroundError::Decompression(e.to_string()))
    }
}
