//! Julia avatar rasterization.
//!
//! Samples a fixed square viewport of width 3.0 centered at the origin into
//! `size × size` pixels, runs the escape-time recurrence per pixel and
//! color-maps the result. Pixels are independent; with the `parallel`
//! feature rows are filled concurrently, producing an identical buffer.

use avatar_core::error::{validate_iterations, validate_size};
use avatar_core::{colorize, escape_time, AvatarResult, Complex, Identifier, JuliaParameters};

use crate::error::{RenderError, RenderResult};
use crate::raster::{rgba_len, PixelBuffer, RenderedImage};

/// Width of the sampled square in the complex plane.
pub const VIEWPORT: f64 = 3.0;

/// A validated render request; also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderRequest {
    /// Canonical identifier.
    pub identifier: Identifier,
    /// Edge length in pixels.
    pub size: u32,
    /// Escape-iteration budget.
    pub max_iterations: u32,
}

impl RenderRequest {
    /// Validate and canonicalize a request.
    ///
    /// # Errors
    ///
    /// Returns an [`avatar_core::AvatarError`] if the identifier has fewer
    /// than 32 hex digits, `size` is zero or above [`avatar_core::MAX_SIZE`],
    /// or `max_iterations` is zero.
    pub fn new(identifier: &str, size: u32, max_iterations: u32) -> AvatarResult<Self> {
        Ok(Self {
            identifier: Identifier::parse(identifier)?,
            size: validate_size(size)?,
            max_iterations: validate_iterations(max_iterations)?,
        })
    }

    /// Cache key, `julia-{hex}-{size}-{max_iterations}`.
    ///
    /// The canonical identifier is pure hex, so the `-` separators cannot be
    /// confused with identifier content.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "julia-{}-{}-{}",
            self.identifier, self.size, self.max_iterations
        )
    }
}

/// Render the raw RGBA pixels of an avatar.
///
/// # Errors
///
/// Returns an error if parameters cannot be derived or the buffer cannot be
/// allocated.
pub fn render_pixels(request: &RenderRequest) -> RenderResult<PixelBuffer> {
    let params = JuliaParameters::from_identifier(&request.identifier)?;
    let size = request.size;
    let len = rgba_len(size, size)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| RenderError::Buffer(format!("{size}x{size} RGBA buffer: {e}")))?;
    data.resize(len, 0u8);
    let row_bytes = size as usize * 4;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(row_bytes)
            .enumerate()
            .for_each(|(py, row)| fill_row(row, py, size, request.max_iterations, &params));
    }

    #[cfg(not(feature = "parallel"))]
    for (py, row) in data.chunks_mut(row_bytes).enumerate() {
        fill_row(row, py, size, request.max_iterations, &params);
    }

    PixelBuffer::from_raw(size, size, data)
}

/// Render and PNG-encode an avatar.
///
/// # Errors
///
/// Returns an error if parameters cannot be derived or encoding fails.
pub fn render(request: &RenderRequest) -> RenderResult<RenderedImage> {
    let pixels = render_pixels(request)?;
    let image = pixels.encode_png()?;
    tracing::debug!(
        id = %request.identifier,
        size = request.size,
        max_iterations = request.max_iterations,
        bytes = image.as_png().len(),
        "rendered avatar"
    );
    Ok(image)
}

/// Fill one row of RGBA pixels.
#[allow(clippy::cast_precision_loss)]
fn fill_row(row: &mut [u8], py: usize, size: u32, max_iterations: u32, params: &JuliaParameters) {
    let half = f64::from(size) / 2.0;
    let scale = VIEWPORT / f64::from(size);
    let im = (py as f64 - half) * scale;

    for (px, out) in row.chunks_exact_mut(4).enumerate() {
        let z0 = Complex::new((px as f64 - half) * scale, im);
        let iteration = escape_time(z0, params.c, max_iterations);
        let color = colorize(iteration, max_iterations, params.hue, params.sat_base);
        out.copy_from_slice(&color.to_rgba());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_core::AvatarError;

    const ZERO_ID: &str = "00000000-0000-0000-0000-000000000000";
    const REFERENCE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_request_validation() {
        assert!(RenderRequest::new(REFERENCE_ID, 64, 50).is_ok());
        assert_eq!(
            RenderRequest::new(REFERENCE_ID, 0, 50),
            Err(AvatarError::InvalidSize(0))
        );
        assert_eq!(
            RenderRequest::new(REFERENCE_ID, 64, 0),
            Err(AvatarError::InvalidIterationBudget(0))
        );
        assert!(matches!(
            RenderRequest::new("short", 64, 50),
            Err(AvatarError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_oversized_request_rejected() {
        assert_eq!(
            RenderRequest::new(REFERENCE_ID, 1 << 20, 1),
            Err(AvatarError::InvalidSize(1 << 20))
        );
        assert!(RenderRequest::new(REFERENCE_ID, avatar_core::MAX_SIZE, 1).is_ok());
    }

    #[test]
    fn test_unallocatable_buffer_is_error() {
        // Fields are public, so validation can be bypassed.
        let request = RenderRequest {
            identifier: Identifier::parse(REFERENCE_ID).unwrap(),
            size: u32::MAX,
            max_iterations: 1,
        };
        assert!(matches!(
            render_pixels(&request),
            Err(RenderError::Buffer(_))
        ));
    }

    #[test]
    fn test_cache_key() {
        let request = RenderRequest::new(REFERENCE_ID, 64, 50).unwrap();
        assert_eq!(
            request.cache_key(),
            "julia-550e8400e29b41d4a716446655440000-64-50"
        );
    }

    #[test]
    fn test_cache_keys_distinct() {
        let a = RenderRequest::new(REFERENCE_ID, 16, 150).unwrap();
        let b = RenderRequest::new(REFERENCE_ID, 161, 50).unwrap();
        let c = RenderRequest::new(REFERENCE_ID, 1, 6150).unwrap();
        assert_ne!(a.cache_key(), b.cache_key());
        assert_ne!(a.cache_key(), c.cache_key());
        assert_ne!(b.cache_key(), c.cache_key());
    }

    #[test]
    fn test_reference_pixels() {
        let request = RenderRequest::new(REFERENCE_ID, 16, 50).unwrap();
        let pixels = render_pixels(&request).unwrap();
        assert_eq!(pixels.pixel(0, 0), Some([15, 70, 37, 255]));
        assert_eq!(pixels.pixel(8, 8), Some([22, 90, 157, 255]));
        assert_eq!(pixels.pixel(15, 15), Some([16, 74, 42, 255]));
        assert_eq!(pixels.pixel(4, 10), Some([22, 76, 168, 255]));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_rows_match_sequential() {
        let request = RenderRequest::new(REFERENCE_ID, 33, 50).unwrap();
        let params = JuliaParameters::from_identifier(&request.identifier).unwrap();
        let mut expected = vec![0u8; 33 * 33 * 4];
        for (py, row) in expected.chunks_mut(33 * 4).enumerate() {
            fill_row(row, py, 33, 50, &params);
        }

        let pixels = render_pixels(&request).unwrap();
        assert_eq!(pixels.data, expected);

        let reference = RenderRequest::new(REFERENCE_ID, 16, 50).unwrap();
        let reference = render_pixels(&reference).unwrap();
        assert_eq!(reference.pixel(0, 0), Some([15, 70, 37, 255]));
        assert_eq!(reference.pixel(8, 8), Some([22, 90, 157, 255]));
        assert_eq!(reference.pixel(15, 15), Some([16, 74, 42, 255]));
        assert_eq!(reference.pixel(4, 10), Some([22, 76, 168, 255]));
    }

    #[test]
    fn test_zero_identifier_pixels() {
        let request = RenderRequest::new(ZERO_ID, 16, 50).unwrap();
        let pixels = render_pixels(&request).unwrap();
        assert_eq!(pixels.pixel(0, 0), Some([65, 38, 20, 255]));
        // Centre maps to z0 = 0, inside the set.
        assert_eq!(pixels.pixel(8, 8), Some([15, 12, 20, 255]));
    }

    #[test]
    fn test_alpha_always_opaque() {
        let request = RenderRequest::new(REFERENCE_ID, 24, 30).unwrap();
        let pixels = render_pixels(&request).unwrap();
        assert!(pixels.data.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_odd_size() {
        let request = RenderRequest::new(REFERENCE_ID, 7, 50).unwrap();
        let pixels = render_pixels(&request).unwrap();
        assert_eq!(pixels.width, 7);
        assert_eq!(pixels.height, 7);
        assert_eq!(pixels.data.len(), 7 * 7 * 4);
    }

    #[test]
    fn test_render_deterministic() {
        let request = RenderRequest::new(REFERENCE_ID, 32, 50).unwrap();
        let first = render(&request).unwrap();
        let second = render(&request).unwrap();
        assert_eq!(first.as_png(), second.as_png());
    }

    #[test]
    fn test_render_round_trips_pixels() {
        let request = RenderRequest::new(REFERENCE_ID, 20, 40).unwrap();
        let pixels = render_pixels(&request).unwrap();
        let decoded = render(&request).unwrap().decode().unwrap();
        assert_eq!(decoded, pixels);
    }
}
