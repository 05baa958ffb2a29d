use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),
    
    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),
    
    #[error("Failed to encode image: {0}")]
    EncodeError(String),
    
    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("file contains not enough samples for at least one line of chosen width {width} ({available} bytes available)")]
    InsufficientData { width: u32, available: u64 },
    
    #[error("Unsupported output format: {0} (expected bmp, png, jpg or jpeg)")]
    UnsupportedFormat(String),
    
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
