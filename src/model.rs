use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub name: &'static str,
    pub width_pt: f32,  // points, 1/72 inch
    pub height_pt: f32, // points, 1/72 inch
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        name: "US Letter",
        width_pt: 612.0,
        height_pt: 792.0,
    };

    pub const A4: PageSize = PageSize {
        name: "A4",
        width_pt: 595.28,
        height_pt: 841.89,
    };

    pub const ALL: [PageSize; 2] = [PageSize::LETTER, PageSize::A4];

    /// Resolve a form key (`letter`, `a4`) or display name, ignoring case.
    pub fn from_key(key: &str) -> Option<PageSize> {
        match key.trim().to_ascii_lowercase().as_str() {
            "letter" | "us letter" | "us-letter" => Some(PageSize::LETTER),
            "a4" => Some(PageSize::A4),
            _ => None,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.height_pt / self.width_pt
    }

    /// Page height in layout units for a preview `layout_width` units wide.
    pub fn layout_height(&self, layout_width: f32) -> f32 {
        (layout_width * self.aspect()).round()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::LETTER
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        PageSize::from_key(key).ok_or_else(|| Error::UnknownPageSize(key.to_string()))
    }
}

/// A clickable region of a rendered page. Top-left origin, y grows downward,
/// in the same layout units as the page the link was collected from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LinkRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub url: String,
}

/// One page rasterized to JPEG.
#[derive(Clone, Debug)]
pub struct RasterPage {
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub scale: f32, // points per layout unit
}

impl RasterPage {
    /// Scale chosen so that `layout_width` layout units span the full page width.
    pub fn fit_width(
        jpeg: Vec<u8>,
        width_px: u32,
        height_px: u32,
        layout_width: f32,
        page_size: &PageSize,
    ) -> Self {
        RasterPage {
            jpeg,
            width_px,
            height_px,
            scale: page_size.width_pt / layout_width,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PageInput {
    pub raster: RasterPage,
    pub links: Vec<LinkRect>,
}

/// A group of blocks that fit on one page, in their original order.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<B> {
    pub blocks: Vec<B>,
}

impl<B> Page<B> {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
