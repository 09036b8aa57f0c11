//! Per-frame depth maps as delivered by the AR runtime.

use crate::error::{DepthCloudError, Result};

/// Byte distance between consecutive pixels in the depth buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// A depth map for one frame.
///
/// Each pixel occupies [`BYTES_PER_PIXEL`] bytes; the first two hold a
/// little-endian 16-bit raw depth value.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
    raw_value_to_meters: f32,
}

impl DepthFrame {
    /// Creates a depth frame.
    ///
    /// Returns [`DepthCloudError::SizeMismatch`] if `data` is shorter than
    /// `width * height * 4` bytes.
    pub fn new(
        width: usize,
        height: usize,
        data: Vec<u8>,
        raw_value_to_meters: f32,
    ) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or(DepthCloudError::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() < expected {
            return Err(DepthCloudError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            raw_value_to_meters,
        })
    }

    /// Builds a frame from raw depth values, one per pixel in row order.
    pub fn from_raw_values(
        width: usize,
        height: usize,
        values: &[u16],
        raw_value_to_meters: f32,
    ) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(DepthCloudError::SizeMismatch {
                expected: usize::MAX,
                actual: values.len(),
            })?;
        if values.len() != expected {
            return Err(DepthCloudError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        let mut data = vec![0u8; values.len() * BYTES_PER_PIXEL];
        for (pixel, value) in data.chunks_exact_mut(BYTES_PER_PIXEL).zip(values) {
            pixel[..2].copy_from_slice(&value.to_le_bytes());
        }
        Self::new(width, height, data, raw_value_to_meters)
    }

    /// Width of the pixel grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the pixel grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Scale from raw depth values to meters.
    pub fn raw_value_to_meters(&self) -> f32 {
        self.raw_value_to_meters
    }

    /// Raw 16-bit depth value at `(x, y)`, or `None` outside the grid.
    pub fn raw_at(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * BYTES_PER_PIXEL;
        let bytes = self.data.get(idx..idx + 2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Depth in meters at `(x, y)`, or `None` outside the grid.
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.raw_at(x, y)
            .map(|raw| f32::from(raw) * self.raw_value_to_meters)
    }
}
