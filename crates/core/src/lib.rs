//! Core domain types and slide-canvas geometry for reconstructing
//! slide images as editable presentations.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::{padded_crop, text_placement, BoundingBox, Canvas, CropRect, ShapeRect};
pub use types::{Alignment, Region, Rgb, TextStyle};
