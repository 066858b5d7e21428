//! Image collection for slide reconstruction.
//!
//! Gathers slide images from the clipboard, raster image files, and PDF
//! files (rasterized page-by-page) into one ordered sequence.

pub mod clipboard;
pub mod collect;
pub mod format;
pub mod pdf;

pub use collect::{collect_images, PageImage, PageOrigin};
pub use format::InputFormat;
pub use pdf::PdfRasterizer;
