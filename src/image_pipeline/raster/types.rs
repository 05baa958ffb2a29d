//! Raster buffer types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Interleaved RGB8 raster, row-major, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Pixel data [R, G, B, R, G, B, ...], black where nothing was read
    pub data: Vec<u8>,
    /// Number of input bytes that were actually turned into pixels
    pub samples_read: u64,
}

impl RasterBuffer {
    pub const CHANNELS: usize = 3;

    /// Creates an all-black raster.
    ///
    /// Fails with `InvalidGeometry` when the buffer size overflows or cannot
    /// be allocated.
    pub fn black(width: u32, height: u32) -> Result<Self> {
        let too_large = || {
            ConversionError::InvalidGeometry(format!(
                "{}x{} raster does not fit in memory",
                width, height
            ))
        };

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(Self::CHANNELS))
            .ok_or_else(too_large)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| too_large())?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            data,
            samples_read: 0,
        })
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        let px = &self.data[offset..offset + Self::CHANNELS];
        Some([px[0], px[1], px[2]])
    }
}
