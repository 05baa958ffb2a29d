use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raster::types::RasterBuffer;
use crate::image_pipeline::encode::types::{ConversionConfig, OutputFormat};

pub trait ImageWriter {
    fn write_image(&self, image: &RasterBuffer, format: OutputFormat, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
