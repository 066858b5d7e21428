//! Error types for slide-image reconstruction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning slide images into a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read an input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input format is not supported or could not be detected.
    #[error("Unsupported or unrecognized input format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode a raster image.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// Failed to encode a cropped region or page to PNG.
    #[error("Image encode error: {0}")]
    ImageEncodeError(String),

    /// Failed to rasterize a PDF page.
    #[error("PDF rendering error: {0}")]
    PdfRenderError(String),

    /// Failed to read an image from the system clipboard.
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// The layout analysis request to the vision model failed.
    #[error("Layout analysis error: {0}")]
    AnalysisError(String),

    /// Failed to assemble the output presentation package.
    #[error("Presentation packaging error: {0}")]
    PackageError(String),
}
