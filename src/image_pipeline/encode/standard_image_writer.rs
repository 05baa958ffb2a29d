use std::io::{Cursor, Write};
use tracing::debug;
use image::{ExtendedColorType, ImageEncoder};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use crate::image_pipeline::common::error::{Result, ConversionError};
use crate::image_pipeline::raster::types::RasterBuffer;
use crate::image_pipeline::encode::types::{ConversionConfig, OutputFormat, PngCompression};
use crate::image_pipeline::encode::writer::ImageWriter;

/// Writer backed by the `image` crate encoders.
pub struct StandardImageWriter;

impl ImageWriter for StandardImageWriter {
    fn write_image(&self, image: &RasterBuffer, format: OutputFormat, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!("Encoding {:?} image: {}x{}", format, image.width, image.height);
        
        let mut buffer = Cursor::new(Vec::new());
        
        let encoded = match format {
            OutputFormat::Bmp => BmpEncoder::new(&mut buffer).write_image(
                &image.data,
                image.width,
                image.height,
                ExtendedColorType::Rgb8,
            ),
            OutputFormat::Png => {
                let compression = match config.png_compression {
                    PngCompression::Fast => CompressionType::Fast,
                    PngCompression::Default => CompressionType::Default,
                    PngCompression::Best => CompressionType::Best,
                };
                PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive).write_image(
                    &image.data,
                    image.width,
                    image.height,
                    ExtendedColorType::Rgb8,
                )
            }
            OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, config.jpeg_quality).write_image(
                &image.data,
                image.width,
                image.height,
                ExtendedColorType::Rgb8,
            ),
        };
        encoded.map_err(|e| ConversionError::EncodeError(e.to_string()))?;
        
        output.write_all(buffer.get_ref())?;
        output.flush()?;
        
        debug!("Encoding complete, {} bytes", buffer.get_ref().len());
        Ok(())
    }
}
