//! Image processing pipeline module
//!
//! This module provides a structured approach to rendering binary data as images,
//! with separate modules for geometry resolution, rasterization, encoding and
//! conversion orchestration.

pub mod geometry;
pub mod raster;
pub mod encode;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use geometry::{
    GeometryRequest,
    ResolvedGeometry,
};

pub use raster::{
    RasterBuffer,
    Rasterizer,
    GrayscaleRasterizer,
};

pub use encode::{
    OutputFormat,
    PngCompression,
    ConversionConfig,
    ConversionConfigBuilder,
    ImageWriter,
    StandardImageWriter,
};

pub use conversions::{
    BinaryToImagePipeline,
    ConversionPlan,
};
