//! Image encoding module
//!
//! This module provides BMP, PNG and JPEG writing for rasters, plus the
//! conversion configuration shared by the pipeline.

mod writer;
mod standard_image_writer;
pub mod types;

pub use writer::ImageWriter;
pub use standard_image_writer::StandardImageWriter;
pub use types::{OutputFormat, PngCompression, ConversionConfig, ConversionConfigBuilder};
