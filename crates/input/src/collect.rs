//! Gathering input images into one ordered sequence.
//!
//! Order matters: a pasted clipboard image comes first, then files in
//! argument order, with PDFs expanding into one image per page. A file
//! that cannot be read or decoded is logged and skipped so the rest of
//! the batch still converts.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use slidesnap_core::{Error, Result};

use crate::clipboard::grab_clipboard_image;
use crate::format::InputFormat;
use crate::pdf::PdfRasterizer;

/// One collected slide image, with where it came from.
pub struct PageImage {
    pub image: DynamicImage,
    pub origin: PageOrigin,
}

impl PageImage {
    /// Encode the image as PNG bytes for the vision model request.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| Error::ImageEncodeError(format!("{}: {e}", self.origin)))?;
        Ok(buf.into_inner())
    }
}

/// Where a collected image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOrigin {
    Clipboard,
    File(PathBuf),
    PdfPage { path: PathBuf, page: usize },
}

impl fmt::Display for PageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOrigin::Clipboard => write!(f, "clipboard"),
            PageOrigin::File(path) => write!(f, "{}", path.display()),
            PageOrigin::PdfPage { path, page } => {
                write!(f, "{} page {}", path.display(), page)
            }
        }
    }
}

/// Collect images from the clipboard and the given files, in order.
///
/// `dpi` controls PDF rasterization resolution. The clipboard is only
/// consulted when `paste` is set; a missing clipboard image is an error
/// there because the user explicitly asked for it, while unreadable
/// files are skipped with a warning.
pub fn collect_images(paste: bool, files: &[PathBuf], dpi: u32) -> Result<Vec<PageImage>> {
    let mut pages = Vec::new();

    if paste {
        let image = grab_clipboard_image()?;
        pages.push(PageImage {
            image,
            origin: PageOrigin::Clipboard,
        });
    }

    // The rasterizer binds pdfium lazily, only once a PDF shows up.
    let mut rasterizer: Option<PdfRasterizer> = None;

    for path in files {
        match collect_file(path, dpi, &mut rasterizer) {
            Ok(mut file_pages) => pages.append(&mut file_pages),
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
            }
        }
    }

    Ok(pages)
}

/// Collect the images for a single input file.
fn collect_file(
    path: &Path,
    dpi: u32,
    rasterizer: &mut Option<PdfRasterizer>,
) -> Result<Vec<PageImage>> {
    let bytes = std::fs::read(path)?;

    let format = InputFormat::from_magic(&bytes)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(InputFormat::from_extension)
        })
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))?;

    match format {
        InputFormat::Pdf => {
            if rasterizer.is_none() {
                *rasterizer = Some(PdfRasterizer::new(dpi)?);
            }
            let Some(rast) = rasterizer.as_ref() else {
                return Err(Error::PdfRenderError("pdfium unavailable".to_string()));
            };
            let rendered = rast.render_pages(&bytes)?;

            log::debug!("rasterized {} into {} pages", path.display(), rendered.len());

            Ok(rendered
                .into_iter()
                .enumerate()
                .map(|(i, image)| PageImage {
                    image,
                    origin: PageOrigin::PdfPage {
                        path: path.to_path_buf(),
                        page: i + 1,
                    },
                })
                .collect())
        }
        InputFormat::Raster => {
            let image = image::load_from_memory(&bytes)
                .map_err(|e| Error::ImageDecodeError(format!("{}: {e}", path.display())))?;
            Ok(vec![PageImage {
                image,
                origin: PageOrigin::File(path.to_path_buf()),
            }])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_origin_display() {
        assert_eq!(PageOrigin::Clipboard.to_string(), "clipboard");
        assert_eq!(
            PageOrigin::File(PathBuf::from("deck.png")).to_string(),
            "deck.png"
        );
        assert_eq!(
            PageOrigin::PdfPage {
                path: PathBuf::from("deck.pdf"),
                page: 3
            }
            .to_string(),
            "deck.pdf page 3"
        );
    }

    #[test]
    fn test_png_bytes_round_trip() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([10, 20, 30, 255]),
        ));
        let page = PageImage {
            image,
            origin: PageOrigin::Clipboard,
        };

        let png = page.png_bytes().unwrap();
        assert_eq!(InputFormat::from_magic(&png), Some(InputFormat::Raster));

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 4);
        assert_eq!(decoded.height(), 4);
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let pages = collect_images(false, &[PathBuf::from("/no/such/file.png")], 144).unwrap();
        assert!(pages.is_empty());
    }
}
