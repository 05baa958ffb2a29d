//! Geometry types

use std::fmt;

/// Default image width in pixels
pub const DEFAULT_WIDTH: u32 = 512;

/// Largest raster the pipeline will allocate (3 GiB of RGB data)
pub const MAX_PIXELS: u64 = 1 << 30;

/// Geometry as requested by the caller, before looking at the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryRequest {
    /// Width of the image in pixels
    pub width: u32,
    /// Height in lines, `None` to derive it from the input length
    pub height: Option<u32>,
    /// Number of bytes to sample, `None` to fill the whole image
    pub samples: Option<u64>,
}

impl Default for GeometryRequest {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: None,
            samples: None,
        }
    }
}

impl GeometryRequest {
    /// Builds a request from command-line style values where 0 means "derive".
    pub fn from_cli(width: u32, height: u32, samples: u64) -> Self {
        Self {
            width,
            height: (height != 0).then_some(height),
            samples: (samples != 0).then_some(samples),
        }
    }
}

/// Final image geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGeometry {
    pub width: u32,
    /// Always at least 1
    pub height: u32,
    /// Never more than `width * height` nor the input length
    pub samples: u64,
}

impl ResolvedGeometry {
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for ResolvedGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reading {} samples resulting in an image of {} lines with {} pixels",
            self.samples, self.height, self.width
        )
    }
}
