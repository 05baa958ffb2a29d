use tracing::{info, instrument};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    geometry::{self, ResolvedGeometry},
    raster::{GrayscaleRasterizer, RasterBuffer, Rasterizer},
    encode::{ConversionConfig, ImageWriter, OutputFormat, StandardImageWriter},
};

/// A validated conversion of one input file into one output image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionPlan {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    /// Input length in bytes at planning time
    pub input_len: u64,
    pub geometry: ResolvedGeometry,
}

pub struct BinaryToImagePipeline<R: Rasterizer, W: ImageWriter> {
    rasterizer: R,
    writer: W,
    config: ConversionConfig,
}

impl BinaryToImagePipeline<GrayscaleRasterizer, StandardImageWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            rasterizer: GrayscaleRasterizer,
            writer: StandardImageWriter,
            config,
        }
    }
}

impl<R: Rasterizer, W: ImageWriter> BinaryToImagePipeline<R, W> {
    pub fn with_custom(rasterizer: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            rasterizer,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: u32, height: u32, format: OutputFormat) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        let limits = [self.config.max_dimension, format.max_dimension()];
        for max in limits.into_iter().flatten() {
            if width > max || height > max {
                tracing::warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Resolves the geometry for an input of `input_len` bytes.
    pub fn resolve_geometry(&self, input_len: u64) -> Result<ResolvedGeometry> {
        geometry::resolve(&self.config.geometry, input_len)
    }

    /// Rasterizes `input` and writes the encoded image to `output`.
    #[instrument(skip(self, input, output))]
    pub fn convert(
        &self,
        input: &mut dyn Read,
        input_len: u64,
        output: &mut dyn Write,
        format: OutputFormat,
    ) -> Result<RasterBuffer> {
        let geometry = self.resolve_geometry(input_len)?;
        let raster = self.rasterize(input, &geometry, format)?;
        self.encode(&raster, format, output)?;
        Ok(raster)
    }

    fn rasterize(
        &self,
        input: &mut dyn Read,
        geometry: &ResolvedGeometry,
        format: OutputFormat,
    ) -> Result<RasterBuffer> {
        {
            let _span = tracing::info_span!("validate_dimensions",
                width = geometry.width,
                height = geometry.height
            ).entered();
            self.validate_dimensions(geometry.width, geometry.height, format)?;
        }

        let _span = tracing::info_span!("rasterize", samples = geometry.samples).entered();
        self.rasterizer.rasterize(input, geometry)
    }

    fn encode(&self, raster: &RasterBuffer, format: OutputFormat, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_image", ?format).entered();
        self.writer.write_image(raster, format, output, &self.config)
    }

    /// Checks the output format and resolves the geometry without touching
    /// the input contents. The format is checked before any file I/O.
    #[instrument(skip(self, input_path, output_path))]
    pub fn plan<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<ConversionPlan> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let format = OutputFormat::from_path(output_path)?;

        let input_len = std::fs::metadata(input_path)
            .map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
            .len();

        let geometry = self.resolve_geometry(input_len)?;

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            ?format,
            input_len,
            "Planned conversion"
        );

        Ok(ConversionPlan {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            format,
            input_len,
            geometry,
        })
    }

    /// Runs a plan: reads the input, encodes, then writes the output file.
    ///
    /// The output file is only created once encoding succeeded.
    #[instrument(skip(self, plan), fields(input_len = plan.input_len))]
    pub fn execute(&self, plan: &ConversionPlan) -> Result<RasterBuffer> {
        let raster = {
            let _span = tracing::info_span!("read_input_file").entered();
            let file = File::open(&plan.input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", plan.input_path.display(), e))
            })?;
            let mut reader = BufReader::new(file);
            self.rasterize(&mut reader, &plan.geometry, plan.format)?
        };

        let mut encoded = Vec::new();
        self.encode(&raster, plan.format, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            let mut output_file = File::create(&plan.output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", plan.output_path.display(), e))
            })?;
            output_file.write_all(&encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", plan.output_path.display(), e))
            })?;
        }

        info!(
            width = raster.width,
            height = raster.height,
            samples = raster.samples_read,
            "Conversion complete"
        );
        Ok(raster)
    }

    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<RasterBuffer> {
        let plan = self.plan(input_path, output_path)?;
        self.execute(&plan)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
