//! System clipboard image capture.

use image::{DynamicImage, RgbaImage};
use slidesnap_core::{Error, Result};

/// Grab the image currently on the system clipboard.
///
/// Fails when the clipboard is unavailable or holds no image data.
pub fn grab_clipboard_image() -> Result<DynamicImage> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| Error::ClipboardError(format!("failed to open clipboard: {e}")))?;

    let data = clipboard
        .get_image()
        .map_err(|e| Error::ClipboardError(format!("no image on clipboard: {e}")))?;

    let (width, height) = (data.width as u32, data.height as u32);
    let rgba = RgbaImage::from_raw(width, height, data.bytes.into_owned()).ok_or_else(|| {
        Error::ClipboardError(format!(
            "clipboard image data does not match its reported {width}x{height} size"
        ))
    })?;

    Ok(DynamicImage::ImageRgba8(rgba))
}
