use std::path::Path;
use std::process::Command;

use std::io::Write;

use binmagine::image_pipeline::{
    BinaryToImagePipeline, ConversionConfig, ConversionError, GrayscaleRasterizer, ImageWriter,
    OutputFormat, RasterBuffer, ResolvedGeometry,
};
use tempfile::TempDir;

fn write_input(dir: &Path, name: &str, data: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn pseudo_random(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn binmagine() -> Command {
    Command::new(env!("CARGO_BIN_EXE_binmagine"))
}

#[test]
fn renders_1024_bytes_as_two_lines() {
    let dir = TempDir::new().unwrap();
    let data = pseudo_random(1024);
    let input = write_input(dir.path(), "input.bin", &data);
    let output = dir.path().join("out.png");

    let pipeline = BinaryToImagePipeline::new(ConversionConfig::default());
    let plan = pipeline.plan(&input, &output).unwrap();
    assert_eq!(plan.format, OutputFormat::Png);
    assert_eq!(plan.input_len, 1024);
    assert_eq!(plan.geometry, ResolvedGeometry { width: 512, height: 2, samples: 1024 });

    pipeline.execute(&plan).unwrap();

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (512, 2));
    for x in 0..512u32 {
        let top = data[x as usize];
        let bottom = data[512 + x as usize];
        assert_eq!(decoded.get_pixel(x, 0).0, [top, top, top]);
        assert_eq!(decoded.get_pixel(x, 1).0, [bottom, bottom, bottom]);
    }
}

#[test]
fn pixels_past_the_samples_are_black() {
    let dir = TempDir::new().unwrap();
    let data = vec![0xAAu8; 1000];
    let input = write_input(dir.path(), "input.bin", &data);
    let output = dir.path().join("out.bmp");

    let config = ConversionConfig::builder()
        .width(100)
        .height(Some(20))
        .build();
    let raster = BinaryToImagePipeline::new(config)
        .convert_file(&input, &output)
        .unwrap();
    assert_eq!((raster.width, raster.height, raster.samples_read), (100, 20, 1000));

    let decoded = image::open(&output).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (100, 20));
    for (x, y, px) in decoded.enumerate_pixels() {
        let expected = if y * 100 + x < 1000 { 0xAA } else { 0 };
        assert_eq!(px.0, [expected; 3], "pixel ({x}, {y})");
    }
}

#[test]
fn explicit_samples_limit_the_image() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(10_000));
    let output = dir.path().join("out.png");

    let config = ConversionConfig::builder()
        .width(256)
        .samples(Some(1000))
        .build();
    let pipeline = BinaryToImagePipeline::new(config);
    let plan = pipeline.plan(&input, &output).unwrap();

    assert_eq!(plan.geometry.height, 3);
    assert!(plan.geometry.samples <= 1000);
    assert_eq!(plan.geometry.samples, 768);
}

#[test]
fn unsupported_extension_fails_before_io() {
    let dir = TempDir::new().unwrap();
    let missing_input = dir.path().join("does-not-exist.bin");
    let output = dir.path().join("out.xyz");

    let pipeline = BinaryToImagePipeline::new(ConversionConfig::default());
    let err = pipeline.convert_file(&missing_input, &output).unwrap_err();

    // The format is checked before the input is even looked at
    assert!(matches!(err, ConversionError::UnsupportedFormat(_)));
    assert!(!output.exists());
}

/// Writes half of an image and then gives up.
struct FailingWriter;

impl ImageWriter for FailingWriter {
    fn write_image(
        &self,
        _image: &RasterBuffer,
        _format: OutputFormat,
        output: &mut dyn Write,
        _config: &ConversionConfig,
    ) -> binmagine::image_pipeline::Result<()> {
        output.write_all(b"BM partial")?;
        Err(ConversionError::EncodeError("encoder gave up".to_string()))
    }
}

#[test]
fn failed_encode_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(4096));
    let output = dir.path().join("out.bmp");

    let pipeline = BinaryToImagePipeline::with_custom(
        GrayscaleRasterizer,
        FailingWriter,
        ConversionConfig::default(),
    );
    let plan = pipeline.plan(&input, &output).unwrap();
    let err = pipeline.execute(&plan).unwrap_err();

    assert!(matches!(err, ConversionError::EncodeError(_)));
    assert!(!output.exists());
}

#[test]
fn oversized_jpeg_fails_after_planning_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(70_000));
    let output = dir.path().join("wide.jpg");

    let pipeline = BinaryToImagePipeline::new(ConversionConfig::builder().width(70_000).build());
    let plan = pipeline.plan(&input, &output).unwrap();
    assert_eq!(plan.geometry, ResolvedGeometry { width: 70_000, height: 1, samples: 70_000 });

    let err = pipeline.execute(&plan).unwrap_err();
    assert!(matches!(err, ConversionError::InvalidDimensions(70_000, 1)));
    assert!(!output.exists());
}

#[test]
fn huge_height_is_an_error_not_an_abort() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(4096));

    let result = binmagine()
        .arg(&input)
        .args(["--width", "65536", "--height", "4000000", "-o"])
        .arg(dir.path().join("out.png"))
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Invalid geometry"));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn small_file_is_insufficient() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "tiny.bin", &[1, 2, 3]);
    let output = dir.path().join("out.png");

    let err = BinaryToImagePipeline::new(ConversionConfig::default())
        .convert_file(&input, &output)
        .unwrap_err();

    assert!(matches!(err, ConversionError::InsufficientData { width: 512, available: 3 }));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = BinaryToImagePipeline::new(ConversionConfig::default())
        .plan(dir.path().join("nope.bin"), dir.path().join("out.png"))
        .unwrap_err();

    assert!(matches!(err, ConversionError::InputReadError(_)));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(64 * 40));

    for extension in ["bmp", "png", "jpg"] {
        let first = dir.path().join(format!("first.{extension}"));
        let second = dir.path().join(format!("second.{extension}"));
        let pipeline = BinaryToImagePipeline::new(ConversionConfig::builder().width(64).build());

        pipeline.convert_file(&input, &first).unwrap();
        pipeline.convert_file(&input, &second).unwrap();

        assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
    }
}

#[test]
fn cli_prints_summary_and_writes_image() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(2048));
    let output = dir.path().join("dump.bmp");

    let result = binmagine()
        .arg(&input)
        .args(["--width", "256", "-o"])
        .arg(&output)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("reading 2048 samples resulting in an image of 8 lines with 256 pixels"));
    assert!(stdout.contains("wrote"));

    let decoded = image::open(&output).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (256, 8));
}

#[test]
fn cli_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &pseudo_random(2048));
    let output = dir.path().join("out.xyz");

    let result = binmagine().arg(&input).arg("-o").arg(&output).output().unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unsupported output format"));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn cli_rejects_too_small_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "input.bin", &[0u8; 100]);

    let result = binmagine()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("not enough samples"));
}
