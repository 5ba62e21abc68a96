use crate::error::{Error, Result};
use crate::model::{LinkRect, PageInput, PageSize, RasterPage};
use crate::paginate::paginate;
use crate::pdf;

const SLUG_MAX_LEN: usize = 80;
const SLUG_FALLBACK: &str = "artist";

pub const DEFAULT_FILENAME_PREFIX: &str = "guttersville-press-kit";

/// A page as produced by the renderer: a JPEG plus the anchors found on it,
/// both in the layout coordinates of the page.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub jpeg: Vec<u8>,
    pub links: Vec<LinkRect>,
}

/// Turns a laid-out page into pixels. Implemented by whatever owns layout
/// (a browser, a headless renderer, a test double).
pub trait Rasterizer<B> {
    fn rasterize(&mut self, page_index: usize, blocks: &[B]) -> Result<RenderedPage>;
}

impl<B, F> Rasterizer<B> for F
where
    F: FnMut(usize, &[B]) -> Result<RenderedPage>,
{
    fn rasterize(&mut self, page_index: usize, blocks: &[B]) -> Result<RenderedPage> {
        self(page_index, blocks)
    }
}

#[derive(Clone, Debug)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Paginate `blocks` for a preview `layout_width` units wide, rasterize every
/// page in order and encode the result.
pub fn export<B, I, M, R>(
    blocks: I,
    page_size: &PageSize,
    layout_width: f32,
    measure: M,
    rasterizer: &mut R,
) -> Result<Export>
where
    I: IntoIterator<Item = B>,
    M: FnMut(&[B]) -> f32,
    R: Rasterizer<B>,
{
    if !(layout_width > 0.0 && layout_width.is_finite()) {
        return Err(Error::InvalidLayout(layout_width));
    }
    let t0 = std::time::Instant::now();

    let page_height = page_size.layout_height(layout_width);
    let pages = paginate(blocks, page_height, measure);
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }
    let t_paginate = t0.elapsed();

    let mut inputs = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let rendered = rasterizer.rasterize(i, &page.blocks)?;
        let raster = RasterPage::from_jpeg(rendered.jpeg, layout_width, page_size)?;
        inputs.push(PageInput {
            raster,
            links: rendered.links,
        });
    }
    let t_raster = t0.elapsed();

    let bytes = pdf::encode(&inputs, page_size)?;
    let t_total = t0.elapsed();

    log::info!(
        "Export timing: paginate={:.1}ms, rasterize={:.1}ms, encode={:.1}ms ({} pages, {}, page height {})",
        t_paginate.as_secs_f64() * 1000.0,
        (t_raster - t_paginate).as_secs_f64() * 1000.0,
        (t_total - t_raster).as_secs_f64() * 1000.0,
        inputs.len(),
        page_size.name,
        page_height,
    );

    Ok(Export {
        bytes,
        page_count: inputs.len(),
    })
}

/// Lower-case `name`, collapse every run of characters outside `[a-z0-9]` into
/// one hyphen, trim hyphens from both ends and cap the length.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    let truncated: String = trimmed.chars().take(SLUG_MAX_LEN).collect();
    if truncated.is_empty() {
        SLUG_FALLBACK.to_string()
    } else {
        truncated
    }
}

/// `<prefix>-<slug>.pdf`, e.g. `guttersville-press-kit-the-gutter-kids.pdf`.
pub fn export_filename(prefix: &str, display_name: &str) -> String {
    format!("{prefix}-{}.pdf", slugify(display_name))
}
