use std::io::Read;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::geometry::types::ResolvedGeometry;
use crate::image_pipeline::raster::types::RasterBuffer;

pub trait Rasterizer {
    fn rasterize(&self, input: &mut dyn Read, geometry: &ResolvedGeometry) -> Result<RasterBuffer>;
}
