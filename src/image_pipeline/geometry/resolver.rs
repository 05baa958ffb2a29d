use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::geometry::types::{GeometryRequest, ResolvedGeometry, MAX_PIXELS};

/// Resolves the final geometry for an input of `input_len` bytes.
///
/// Precedence:
/// - no height: as many full lines as the input holds
/// - no sample count: enough samples to fill every line
/// - explicit sample count: height is capped so the image never needs more
///   samples than requested
///
/// The resulting sample count is additionally capped by the pixel count and
/// by the input length. A height or sample count of 0 counts as unset.
pub fn resolve(request: &GeometryRequest, input_len: u64) -> Result<ResolvedGeometry> {
    let width = request.width;
    if width == 0 {
        return Err(ConversionError::InvalidGeometry(
            "width must be at least 1".to_string(),
        ));
    }
    let width_u64 = u64::from(width);

    let mut height = match request.height.filter(|&h| h != 0) {
        Some(height) => u64::from(height),
        None => input_len / width_u64,
    };

    let samples = match request.samples.filter(|&s| s != 0) {
        None => height * width_u64,
        Some(samples) => {
            height = height.min(samples / width_u64);
            samples
        }
    };

    if height == 0 {
        return Err(ConversionError::InsufficientData {
            width,
            available: input_len,
        });
    }

    let height = u32::try_from(height).map_err(|_| {
        ConversionError::InvalidGeometry(format!("{} lines exceed the supported height", height))
    })?;

    let pixel_count = width_u64 * u64::from(height);
    if pixel_count > MAX_PIXELS {
        return Err(ConversionError::InvalidGeometry(format!(
            "{}x{} raster exceeds the limit of {} pixels",
            width, height, MAX_PIXELS
        )));
    }

    let samples = samples.min(pixel_count).min(input_len);

    debug!(width, height, samples, input_len, "Resolved geometry");

    Ok(ResolvedGeometry {
        width,
        height,
        samples,
    })
}
