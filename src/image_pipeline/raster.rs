//! Raster module
//!
//! Turns a byte stream into an RGB raster, one pixel per input byte.

mod rasterizer;
mod grayscale_rasterizer;
pub mod types;

pub use rasterizer::Rasterizer;
pub use grayscale_rasterizer::GrayscaleRasterizer;
pub use types::RasterBuffer;
