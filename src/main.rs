use std::path::PathBuf;

use anyhow::{Context, Result};
use binmagine::image_pipeline::{
    BinaryToImagePipeline, ConversionConfig, GeometryRequest, PngCompression,
};
use binmagine::logger;
use clap::{Parser, ValueEnum};

use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the bytes of a file as a grayscale image")]
struct Args {
    /// Path to the file that should be analysed (file is read as binary data)
    file: PathBuf,

    /// Width of the resulting image
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Height of the resulting image, 0 derives it from the file size (this may lead to not reading all samples)
    #[arg(long, default_value_t = 0)]
    height: u32,

    /// Number of samples that should be taken from the file, 0 reads as many as fit (takes precedence over dimension parameters)
    #[arg(short, long, default_value_t = 0)]
    samples: u64,

    /// Path to the output file (the extension selects bmp, png or jpeg)
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// JPEG quality
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: u8,

    /// PNG compression level
    #[arg(long, value_enum, default_value_t = PngLevel::Default)]
    png_compression: PngLevel,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PngLevel {
    Fast,
    Default,
    Best,
}

impl From<PngLevel> for PngCompression {
    fn from(level: PngLevel) -> Self {
        match level {
            PngLevel::Fast => PngCompression::Fast,
            PngLevel::Default => PngCompression::Default,
            PngLevel::Best => PngCompression::Best,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(if args.verbose { "debug" } else { "warn" });

    debug!(?args, "Parsed arguments");

    let config = ConversionConfig::builder()
        .geometry(GeometryRequest::from_cli(args.width, args.height, args.samples))
        .jpeg_quality(args.jpeg_quality)
        .png_compression(args.png_compression.into())
        .build();
    let pipeline = BinaryToImagePipeline::new(config);

    let plan = pipeline
        .plan(&args.file, &args.output)
        .with_context(|| format!("Cannot convert {}", args.file.display()))?;

    println!("{}", plan.geometry);
    info!("Output format: {:?}", plan.format);

    let raster = pipeline
        .execute(&plan)
        .with_context(|| format!("Failed to render {}", plan.input_path.display()))?;

    println!(
        "wrote {} ({}x{}, {} samples)",
        plan.output_path.display(),
        raster.width,
        raster.height,
        raster.samples_read
    );
    Ok(())
}
