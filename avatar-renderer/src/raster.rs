//! Raster buffers and encoded avatar images.
//!
//! A [`PixelBuffer`] holds raw RGBA pixels; a [`RenderedImage`] is the opaque
//! PNG-encoded result handed to callers, usable directly as bytes, as a
//! `data:` URI or as a CSS `url(...)` background.

use std::sync::Arc;

use base64::Engine;
use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};

/// MIME type of every encoded avatar.
pub const PNG_MIME: &str = "image/png";

/// PNG signature bytes.
const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

/// Raw RGBA pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA data, checking its length against the dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Buffer`] if `data` is not `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> RenderResult<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(RenderError::Buffer(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA value at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode the buffer as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if the PNG encoder fails.
    pub fn encode_png(&self) -> RenderResult<RenderedImage> {
        let mut buf = Vec::new();
        image::codecs::png::PngEncoder::new(&mut buf)
            .write_image(
                &self.data,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))?;

        Ok(RenderedImage {
            png: Arc::from(buf),
            width: self.width,
            height: self.height,
        })
    }
}

/// Byte length of a `width × height` RGBA buffer.
///
/// # Errors
///
/// Returns [`RenderError::Buffer`] if the length overflows `usize`.
pub fn rgba_len(width: u32, height: u32) -> RenderResult<usize> {
    let w = usize::try_from(width).map_err(|e| RenderError::Buffer(e.to_string()))?;
    let h = usize::try_from(height).map_err(|e| RenderError::Buffer(e.to_string()))?;
    w.checked_mul(h)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| RenderError::Buffer(format!("{width}x{height} RGBA buffer overflows")))
}

/// An encoded avatar image.
///
/// Immutable once produced; clones share the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    png: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl RenderedImage {
    /// The PNG bytes.
    #[must_use]
    pub fn as_png(&self) -> &[u8] {
        &self.png
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `data:image/png;base64,...` URI for direct use as an image source.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.png);
        format!("data:{PNG_MIME};base64,{encoded}")
    }

    /// CSS background value, `url(data:image/png;base64,...)`.
    #[must_use]
    pub fn to_css_background(&self) -> String {
        format!("url({})", self.to_data_uri())
    }

    /// Decode back into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Encode`] if the bytes are not a valid PNG.
    pub fn decode(&self) -> RenderResult<PixelBuffer> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode(format!("Failed to decode PNG: {e}")))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(PixelBuffer {
            width,
            height,
            data: rgba.into_raw(),
        })
    }

    /// Rebuild an image from a base64 PNG data URI previously produced by
    /// [`RenderedImage::to_data_uri`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::DataUri`] if the URI is malformed, not base64, or
    /// not a PNG, and [`RenderError::Encode`] if the PNG cannot be decoded.
    pub fn from_data_uri(uri: &str) -> RenderResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| RenderError::DataUri("missing data: scheme".to_string()))?;

        let (metadata, encoded) = rest
            .split_once(',')
            .ok_or_else(|| RenderError::DataUri("missing comma".to_string()))?;

        if !metadata.contains(";base64") {
            return Err(RenderError::DataUri("only base64 payloads are supported".to_string()));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| RenderError::DataUri(format!("Failed to decode base64: {e}")))?;

        if !bytes.starts_with(&PNG_MAGIC) {
            return Err(RenderError::DataUri("payload is not a PNG".to_string()));
        }

        let image = Self {
            png: Arc::from(bytes),
            width: 0,
            height: 0,
        };
        let pixels = image.decode()?;
        Ok(Self {
            width: pixels.width,
            height: pixels.height,
            ..image
        })
    }
}
