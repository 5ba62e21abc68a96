use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::export::{DEFAULT_FILENAME_PREFIX, export_filename};
use crate::model::{LinkRect, PageInput, PageSize, RasterPage};
use crate::raster::jpeg_dimensions;

/// Export job description read from JSON:
///
/// ```json
/// {
///   "name": "The Gutter Kids",
///   "page_size": "a4",
///   "layout_width": 816,
///   "pages": [{ "image": "page-1.jpg", "links": [{ "x": 40, "y": 900, "width": 200, "height": 24, "url": "https://example.com" }] }]
/// }
/// ```
///
/// Link rectangles are in layout units; without `layout_width` they are taken
/// to be image pixels.
#[derive(Clone, Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub layout_width: Option<f32>,
    /// Output file name prefix, `guttersville-press-kit` when absent.
    #[serde(default)]
    pub filename_prefix: Option<String>,
    pub pages: Vec<ManifestPage>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ManifestPage {
    pub image: PathBuf,
    #[serde(default)]
    pub links: Vec<LinkRect>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| Error::Manifest(e.to_string()))?;
        if let Some(w) = manifest.layout_width {
            if !(w > 0.0 && w.is_finite()) {
                return Err(Error::InvalidLayout(w));
            }
        }
        Ok(manifest)
    }

    /// Load a manifest; relative image paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())))
        })?;
        let mut manifest = Manifest::from_json(&json)?;
        if let Some(dir) = path.parent() {
            for page in &mut manifest.pages {
                if page.image.is_relative() {
                    page.image = dir.join(&page.image);
                }
            }
        }
        Ok(manifest)
    }

    /// Configured page size, falling back to US Letter for missing or
    /// unknown keys.
    pub fn page_size(&self) -> PageSize {
        match self.page_size.as_deref() {
            None => PageSize::default(),
            Some(key) => PageSize::from_key(key).unwrap_or_else(|| {
                log::warn!("Unknown page size {key:?}, using {}", PageSize::default().name);
                PageSize::default()
            }),
        }
    }

    pub fn filename(&self) -> String {
        let prefix = self.filename_prefix.as_deref().unwrap_or(DEFAULT_FILENAME_PREFIX);
        export_filename(prefix, &self.name)
    }

    /// Read every page image and its pixel size.
    pub fn load_pages(&self, page_size: &PageSize) -> Result<Vec<PageInput>> {
        self.pages
            .iter()
            .enumerate()
            .map(|(i, page)| {
                let jpeg = std::fs::read(&page.image).map_err(|e| {
                    Error::Io(std::io::Error::new(
                        e.kind(),
                        format!("{}: {}", e, page.image.display()),
                    ))
                })?;
                let (width, height) = jpeg_dimensions(&jpeg).map_err(|e| {
                    Error::MalformedImage(format!("page {} ({}): {e}", i + 1, page.image.display()))
                })?;
                let layout_width = self.layout_width.unwrap_or(width as f32);
                Ok(PageInput {
                    raster: RasterPage::fit_width(jpeg, width, height, layout_width, page_size),
                    links: page.links.clone(),
                })
            })
            .collect()
    }
}
