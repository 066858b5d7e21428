//! Input file format detection.

/// The format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A PDF document, rasterized page-by-page.
    Pdf,
    /// A raster image (PNG, JPEG, GIF, BMP, WebP).
    Raster,
}

impl InputFormat {
    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PDF: "%PDF"
        if bytes.starts_with(b"%PDF") {
            return Some(Self::Pdf);
        }

        // PNG: \x89PNG
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Raster);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Raster);
        }

        // GIF: "GIF8"
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Raster);
        }

        // BMP: "BM"
        if bytes.starts_with(b"BM") {
            return Some(Self::Raster);
        }

        // WebP: "RIFF" .... "WEBP"
        if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
            return Some(Self::Raster);
        }

        None
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" => Some(Self::Raster),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_magic() {
        assert_eq!(
            InputFormat::from_magic(b"%PDF-1.7 rest"),
            Some(InputFormat::Pdf)
        );
        assert_eq!(
            InputFormat::from_magic(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            Some(InputFormat::Raster)
        );
        assert_eq!(
            InputFormat::from_magic(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(InputFormat::Raster)
        );
        assert_eq!(InputFormat::from_magic(b"GIF89a"), Some(InputFormat::Raster));
        assert_eq!(
            InputFormat::from_magic(b"RIFF\x00\x00\x00\x00WEBP"),
            Some(InputFormat::Raster)
        );
        assert_eq!(InputFormat::from_magic(b"PK\x03\x04"), None);
        assert_eq!(InputFormat::from_magic(b"%P"), None);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(InputFormat::from_extension("pdf"), Some(InputFormat::Pdf));
        assert_eq!(InputFormat::from_extension("PNG"), Some(InputFormat::Raster));
        assert_eq!(InputFormat::from_extension("jpeg"), Some(InputFormat::Raster));
        assert_eq!(InputFormat::from_extension("pptx"), None);
    }
}
