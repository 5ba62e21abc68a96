mod annot;
mod objects;

use pdf_writer::{Content, Name, Rect};

use crate::error::{Error, Result};
use crate::model::{PageInput, PageSize};

pub use annot::link_rect;
use objects::{ObjectTable, PdfObject};

/// Paint one full-bleed image: the unit square is scaled to the page.
fn page_content(image_name: &str, page_size: &PageSize) -> Vec<u8> {
    let mut content = Content::new();
    content.save_state();
    content.transform([page_size.width_pt, 0.0, 0.0, page_size.height_pt, 0.0, 0.0]);
    content.x_object(Name(image_name.as_bytes()));
    content.restore_state();
    content.finish().as_slice().to_vec()
}

/// Encode rasterized pages into a complete PDF file.
///
/// Object numbers are assigned in creation order: catalog, page tree, then per
/// page its image, content stream, link annotations and page object. The page
/// tree's kids are only known once every page exists, so its body is filled
/// last.
pub fn encode(pages: &[PageInput], page_size: &PageSize) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(Error::EmptyDocument);
    }
    let t0 = std::time::Instant::now();

    let mut table = ObjectTable::new();
    let catalog_id = table.alloc();
    let pages_id = table.alloc();
    table.fill(catalog_id, PdfObject::Catalog { pages: pages_id })?;

    let media_box = Rect::new(0.0, 0.0, page_size.width_pt, page_size.height_pt);
    let mut page_ids = Vec::with_capacity(pages.len());
    let mut link_count = 0usize;

    for (i, page) in pages.iter().enumerate() {
        let raster = &page.raster;
        let image_name = format!("Im{}", i + 1);

        let image_id = table.alloc();
        table.fill(
            image_id,
            PdfObject::Image {
                width: raster.width_px,
                height: raster.height_px,
                jpeg: &raster.jpeg,
            },
        )?;

        let content_id = table.alloc();
        table.fill(
            content_id,
            PdfObject::Content {
                ops: page_content(&image_name, page_size),
            },
        )?;

        let mut annots = Vec::with_capacity(page.links.len());
        for link in &page.links {
            let Some(rect) = link_rect(link, raster.scale, page_size.height_pt) else {
                log::warn!(
                    "Dropping link to {} on page {}: invalid rectangle {}x{} at ({}, {})",
                    link.url,
                    i + 1,
                    link.width,
                    link.height,
                    link.x,
                    link.y
                );
                continue;
            };
            let annot_id = table.alloc();
            table.fill(
                annot_id,
                PdfObject::Link {
                    rect,
                    uri: link.url.clone(),
                },
            )?;
            annots.push(annot_id);
        }
        link_count += annots.len();

        let page_id = table.alloc();
        table.fill(
            page_id,
            PdfObject::Page {
                parent: pages_id,
                media_box,
                image_name,
                image: image_id,
                contents: content_id,
                annots,
            },
        )?;
        page_ids.push(page_id);
    }

    let page_count = page_ids.len();
    table.fill(pages_id, PdfObject::PageTree { kids: page_ids })?;

    let t_objects = t0.elapsed();
    let bytes = table.serialize(catalog_id)?;
    let t_total = t0.elapsed();

    log::info!(
        "Encoded {} pages, {} links, {} objects: build={:.1}ms, write={:.1}ms (output {} bytes)",
        page_count,
        link_count,
        table.len(),
        t_objects.as_secs_f64() * 1000.0,
        (t_total - t_objects).as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(bytes)
}
