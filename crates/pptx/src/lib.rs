//! PPTX (Office Open XML) writer backend.
//!
//! Builds .pptx files, which are ZIP archives containing XML documents,
//! from analyzed slide images: cropped pictures on the bottom layer,
//! editable text boxes on top.

pub mod compose;
pub mod model;
pub mod package;
mod template;
mod xml;

pub use compose::compose_slide;
pub use model::{Presentation, Shape, Slide};
pub use package::{save, to_bytes};
