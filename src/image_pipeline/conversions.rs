//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning binary files into images.

mod binary_to_image;


pub use binary_to_image::{BinaryToImagePipeline, ConversionPlan};
