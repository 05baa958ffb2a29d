//! Grayscale rasterizer.
//!
//! Every byte of the input becomes one pixel whose three channels all carry
//! the byte value. Bytes are consumed strictly in stream order and laid out
//! left to right, wrapping to the next line every `width` pixels.

use std::io::{ErrorKind, Read};

use tracing::{debug, warn};
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::geometry::types::ResolvedGeometry;
use crate::image_pipeline::raster::rasterizer::Rasterizer;
use crate::image_pipeline::raster::types::RasterBuffer;

/// Rasterizer mapping byte value `b` to the pixel `(b, b, b)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrayscaleRasterizer;

impl Rasterizer for GrayscaleRasterizer {
    /// Reads at most `geometry.samples` bytes from `input` into a black raster.
    ///
    /// A stream that ends early is not an error: the remaining pixels keep
    /// their black value. The stream is left open for the caller to close.
    fn rasterize(&self, input: &mut dyn Read, geometry: &ResolvedGeometry) -> Result<RasterBuffer> {
        debug!(
            "Rasterizing {} samples into {}x{}",
            geometry.samples, geometry.width, geometry.height
        );

        let mut raster = RasterBuffer::black(geometry.width, geometry.height)?;
        let budget = geometry.samples.min(geometry.pixel_count());

        // One line per read keeps the scratch buffer small for huge inputs
        let mut chunk = vec![0u8; geometry.width as usize];
        let mut limited = input.take(budget);
        let mut offset = 0usize;

        loop {
            let n = match limited.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };

            let pixels = &mut raster.data[offset * RasterBuffer::CHANNELS..(offset + n) * RasterBuffer::CHANNELS];
            for (px, &value) in pixels.chunks_exact_mut(RasterBuffer::CHANNELS).zip(&chunk[..n]) {
                px.fill(value);
            }
            offset += n;
        }

        raster.samples_read = offset as u64;

        if raster.samples_read < budget {
            warn!(
                "Input ended after {} of {} samples, remaining pixels stay black",
                raster.samples_read, budget
            );
        }

        Ok(raster)
    }
}
