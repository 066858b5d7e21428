//! Mapping model-reported regions onto a fixed-size slide canvas.
//!
//! The vision model reports bounding boxes in a normalized 0-1000 space
//! regardless of the source image's pixel size. Reconstruction maps those
//! boxes twice: once into pixel space to crop the source image, and once
//! into EMU space to place the resulting shape on the slide. Picture crops
//! get a small padding so detected edges don't clip visual content; the
//! padding collapses on sides where the box already touches the image edge.

use serde::{Deserialize, Serialize};

/// English Metric Units per inch, the native OOXML length unit.
pub const EMU_PER_INCH: i64 = 914_400;

/// Upper bound of the model's normalized coordinate space.
pub const NORM_MAX: f64 = 1000.0;

/// Fraction of a box's extent added on each side of a picture crop.
pub const CROP_PAD_RATIO: f64 = 0.015;

/// A model-reported bounding box in the normalized 0-1000 space.
///
/// The wire form is the four-number array `[ymin, xmin, ymax, xmax]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub ymin: f64,
    pub xmin: f64,
    pub ymax: f64,
    pub xmax: f64,
}

impl From<[f64; 4]> for BoundingBox {
    fn from([ymin, xmin, ymax, xmax]: [f64; 4]) -> Self {
        Self {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.ymin, b.xmin, b.ymax, b.xmax]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            ymin: 0.0,
            xmin: 0.0,
            ymax: 0.0,
            xmax: 0.0,
        }
    }
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Whether the box has no positive area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// The box with every coordinate pulled back into the 0-1000 space.
    pub fn clamped(&self) -> BoundingBox {
        BoundingBox {
            ymin: self.ymin.clamp(0.0, NORM_MAX),
            xmin: self.xmin.clamp(0.0, NORM_MAX),
            ymax: self.ymax.clamp(0.0, NORM_MAX),
            xmax: self.xmax.clamp(0.0, NORM_MAX),
        }
    }
}

/// The fixed slide canvas, in EMUs.
///
/// Defaults to the standard 16:9 widescreen slide (13.333in x 7.5in).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width_emu: i64,
    pub height_emu: i64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width_emu: 12_192_000,
            height_emu: 6_858_000,
        }
    }
}

/// A shape's position and extent on the slide, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRect {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// A padded picture crop, in source-image pixel coordinates.
///
/// Kept as floats until the final pixel rounding so the slide placement
/// can be computed from exactly the region that was cropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl CropRect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// The crop as integer pixel coordinates for the image library:
    /// `(x, y, width, height)`.
    pub fn pixel_rect(&self) -> (u32, u32, u32, u32) {
        let x = self.left.floor().max(0.0) as u32;
        let y = self.top.floor().max(0.0) as u32;
        let w = (self.right.ceil() - self.left.floor()).max(1.0) as u32;
        let h = (self.bottom.ceil() - self.top.floor()).max(1.0) as u32;
        (x, y, w, h)
    }

    /// Where the cropped picture goes on the slide.
    ///
    /// The placement is proportional to the *cropped* pixel region, padding
    /// included, so the picture covers the same part of the canvas that the
    /// crop covers in the source image.
    pub fn placement(&self, img_width: u32, img_height: u32, canvas: &Canvas) -> ShapeRect {
        let w = img_width as f64;
        let h = img_height as f64;
        ShapeRect {
            x: (self.left / w * canvas.width_emu as f64) as i64,
            y: (self.top / h * canvas.height_emu as f64) as i64,
            cx: (self.width() / w * canvas.width_emu as f64) as i64,
            cy: (self.height() / h * canvas.height_emu as f64) as i64,
        }
    }
}

/// Compute the padded pixel crop for a visual region.
///
/// The box is clamped to the normalized space, scaled to pixels, then
/// expanded by [`CROP_PAD_RATIO`] of its own extent on every side. The
/// expansion is clamped to the image bounds, so a box touching an edge
/// keeps its padding only on the opposite side.
///
/// Returns `None` when the resulting rect would not cover at least one
/// whole pixel in each dimension.
pub fn padded_crop(bbox: &BoundingBox, img_width: u32, img_height: u32) -> Option<CropRect> {
    let b = bbox.clamped();
    if b.is_empty() || img_width == 0 || img_height == 0 {
        return None;
    }

    let w = img_width as f64;
    let h = img_height as f64;

    let x1 = b.xmin / NORM_MAX * w;
    let x2 = b.xmax / NORM_MAX * w;
    let y1 = b.ymin / NORM_MAX * h;
    let y2 = b.ymax / NORM_MAX * h;

    let pad_x = (x2 - x1) * CROP_PAD_RATIO;
    let pad_y = (y2 - y1) * CROP_PAD_RATIO;

    let crop = CropRect {
        left: (x1 - pad_x).max(0.0),
        top: (y1 - pad_y).max(0.0),
        right: (x2 + pad_x).min(w),
        bottom: (y2 + pad_y).min(h),
    };

    if crop.width() < 1.0 || crop.height() < 1.0 {
        return None;
    }
    Some(crop)
}

/// Where a text region's box goes on the slide.
///
/// Text boxes map straight from the normalized space with no padding;
/// the box is clamped first so out-of-range coordinates stay on canvas.
pub fn text_placement(bbox: &BoundingBox, canvas: &Canvas) -> ShapeRect {
    let b = bbox.clamped();
    ShapeRect {
        x: (b.xmin / NORM_MAX * canvas.width_emu as f64) as i64,
        y: (b.ymin / NORM_MAX * canvas.height_emu as f64) as i64,
        cx: (b.width() / NORM_MAX * canvas.width_emu as f64) as i64,
        cy: (b.height() / NORM_MAX * canvas.height_emu as f64) as i64,
    }
}
