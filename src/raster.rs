use std::io::Cursor;

use crate::error::{Error, Result};
use crate::model::{PageSize, RasterPage};

/// Read pixel dimensions from a JPEG header without decoding the image data.
pub fn jpeg_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::with_format(Cursor::new(bytes), image::ImageFormat::Jpeg);
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::MalformedImage(e.to_string()))?;
    if width == 0 || height == 0 {
        return Err(Error::MalformedImage(format!(
            "image has an empty pixel grid ({width}x{height})"
        )));
    }
    Ok((width, height))
}

impl RasterPage {
    /// Wrap JPEG bytes rendered from a page `layout_width` units wide.
    pub fn from_jpeg(jpeg: Vec<u8>, layout_width: f32, page_size: &PageSize) -> Result<Self> {
        let (width, height) = jpeg_dimensions(&jpeg)?;
        log::debug!(
            "Page image {width}x{height}px, {} bytes, layout width {layout_width}",
            jpeg.len()
        );
        Ok(RasterPage::fit_width(jpeg, width, height, layout_width, page_size))
    }
}
