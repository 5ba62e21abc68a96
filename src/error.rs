use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Pagination produced no pages, so there is nothing to export.
    #[error("nothing to render: the document has no content blocks")]
    EmptyDocument,

    /// Page image bytes could not be decoded far enough to read dimensions.
    #[error("malformed page image: {0}")]
    MalformedImage(String),

    /// Preview width used to derive page height and link scale is unusable.
    #[error("invalid layout width {0}: must be a positive, finite number")]
    InvalidLayout(f32),

    #[error("unknown page size {0:?} (known: letter, a4)")]
    UnknownPageSize(String),

    #[error("PDF assembly error: {0}")]
    Pdf(String),

    #[error("invalid manifest: {0}")]
    Manifest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
