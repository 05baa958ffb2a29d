//! Output format and conversion configuration types

use std::path::Path;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::geometry::types::GeometryRequest;

/// Image formats the pipeline can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bmp,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Picks the format from the extension of `path`, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("bmp") => Ok(OutputFormat::Bmp),
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            _ => Err(ConversionError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Largest width or height the format can store, if it has a limit.
    pub fn max_dimension(&self) -> Option<u32> {
        match self {
            OutputFormat::Jpeg => Some(u16::MAX as u32),
            OutputFormat::Bmp | OutputFormat::Png => None,
        }
    }
}

/// PNG compression levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encode, larger file
    Fast,
    /// Encoder default (balanced)
    #[default]
    Default,
    /// Smallest file (slower)
    Best,
}

/// Configuration for binary to image conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Requested width, height and sample count
    pub geometry: GeometryRequest,
    /// JPEG quality between 1 and 100
    pub jpeg_quality: u8,
    /// Compression level for PNG output
    pub png_compression: PngCompression,
    /// Whether to validate image dimensions before encoding
    pub validate_dimensions: bool,
    /// Upper bound for width and height, on top of the format's own limit
    pub max_dimension: Option<u32>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryRequest::default(),
            jpeg_quality: 90,
            png_compression: PngCompression::Default,
            validate_dimensions: true,
            max_dimension: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    width: Option<u32>,
    height: Option<Option<u32>>,
    samples: Option<Option<u64>>,
    jpeg_quality: Option<u8>,
    png_compression: Option<PngCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl ConversionConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
    
    pub fn height(mut self, height: Option<u32>) -> Self {
        self.height = Some(height);
        self
    }
    
    pub fn samples(mut self, samples: Option<u64>) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn geometry(mut self, geometry: GeometryRequest) -> Self {
        self.width = Some(geometry.width);
        self.height = Some(geometry.height);
        self.samples = Some(geometry.samples);
        self
    }
    
    /// Clamped to 1..=100 on build.
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }
    
    pub fn png_compression(mut self, compression: PngCompression) -> Self {
        self.png_compression = Some(compression);
        self
    }
    
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }
    
    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }
    
    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            // 0 means "derive", same as on the command line
            geometry: GeometryRequest {
                width: self.width.unwrap_or(default.geometry.width),
                height: self.height.unwrap_or(default.geometry.height).filter(|&h| h != 0),
                samples: self.samples.unwrap_or(default.geometry.samples).filter(|&s| s != 0),
            },
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality).clamp(1, 100),
            png_compression: self.png_compression.unwrap_or(default.png_compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
