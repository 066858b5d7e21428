//! PDF page rasterization via pdfium.

use image::DynamicImage;
use pdfium_render::prelude::*;
use slidesnap_core::{Error, Result};

/// PDF points per inch, the standard PostScript/PDF unit.
const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Renders PDF pages to images at a configurable DPI.
pub struct PdfRasterizer {
    pdfium: Pdfium,
    dpi: u32,
}

impl PdfRasterizer {
    /// Bind to a pdfium library and create a rasterizer.
    ///
    /// Tries a pdfium shared library next to the executable first, then
    /// falls back to a system-wide installation.
    pub fn new(dpi: u32) -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::PdfRenderError(format!("failed to load pdfium: {e}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
            dpi,
        })
    }

    /// Rasterize every page of a PDF held in memory, in page order.
    pub fn render_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<DynamicImage>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| Error::PdfRenderError(format!("failed to load PDF: {e}")))?;

        let mut pages = Vec::with_capacity(document.pages().len() as usize);

        for (index, page) in document.pages().iter().enumerate() {
            let width_pts = page.width().value;
            let height_pts = page.height().value;

            let render_config = PdfRenderConfig::new()
                .set_target_width((width_pts * self.dpi as f32 / PDF_POINTS_PER_INCH) as i32)
                .set_target_height((height_pts * self.dpi as f32 / PDF_POINTS_PER_INCH) as i32);

            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                Error::PdfRenderError(format!("failed to render page {}: {e}", index + 1))
            })?;

            pages.push(bitmap.as_image());
        }

        Ok(pages)
    }
}
