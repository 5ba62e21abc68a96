mod error;
mod export;
mod manifest;
mod model;
mod paginate;
pub mod pdf;
mod raster;

pub use error::{Error, Result};
pub use export::{
    DEFAULT_FILENAME_PREFIX, Export, Rasterizer, RenderedPage, export, export_filename, slugify,
};
pub use manifest::{Manifest, ManifestPage};
pub use model::{LinkRect, Page, PageInput, PageSize, RasterPage};
pub use paginate::{ContentBlock, StackLayout, paginate};
pub use raster::jpeg_dimensions;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Build a PDF from a JSON manifest of pre-rendered page images.
///
/// `page_size` overrides the manifest's own setting. Without `output` the file
/// is written next to the manifest under [`Manifest::filename`]. Returns the
/// path written.
pub fn convert_manifest_to_pdf(
    manifest_path: &Path,
    output: Option<&Path>,
    page_size: Option<PageSize>,
) -> Result<PathBuf> {
    let t0 = Instant::now();

    let manifest = Manifest::load(manifest_path)?;
    let page_size = page_size.unwrap_or_else(|| manifest.page_size());
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => manifest_path
            .parent()
            .unwrap_or(Path::new(""))
            .join(manifest.filename()),
    };
    let pages = manifest.load_pages(&page_size)?;
    let t_load = t0.elapsed();

    let bytes = pdf::encode(&pages, &page_size)?;
    let t_encode = t0.elapsed();

    std::fs::write(&output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, encode={:.1}ms, write={:.1}ms, total={:.1}ms ({} pages on {}, output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_encode - t_load).as_secs_f64() * 1000.0,
        (t_total - t_encode).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        pages.len(),
        page_size.name,
        bytes.len(),
    );

    Ok(output)
}
