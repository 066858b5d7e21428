//! The writable presentation model.

use slidesnap_core::{Canvas, ShapeRect, TextStyle};

/// A presentation being assembled for writing.
#[derive(Debug, Default)]
pub struct Presentation {
    slides: Vec<Slide>,
    canvas: Canvas,
}

impl Presentation {
    /// Create an empty presentation on the default widescreen canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty presentation on a custom canvas.
    pub fn with_canvas(canvas: Canvas) -> Self {
        Self {
            slides: Vec::new(),
            canvas,
        }
    }

    /// Append a new blank slide and return it for shape placement.
    pub fn add_slide(&mut self) -> &mut Slide {
        self.slides.push(Slide::new());
        self.slides
            .last_mut()
            .expect("slides is non-empty after push")
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }
}

/// A single slide and its shapes, in z-order (first shape is lowest).
#[derive(Debug, Default)]
pub struct Slide {
    shapes: Vec<Shape>,
}

impl Slide {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a cropped picture shape (PNG bytes) at the given position.
    pub fn add_picture(&mut self, png: Vec<u8>, rect: ShapeRect) {
        self.shapes.push(Shape::Picture { png, rect });
    }

    /// Add an editable text box at the given position.
    pub fn add_text_box(&mut self, text: String, rect: ShapeRect, style: TextStyle) {
        self.shapes.push(Shape::TextBox { text, rect, style });
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// The PNG payloads of this slide's pictures, in shape order.
    pub(crate) fn picture_data(&self) -> Vec<&[u8]> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Picture { png, .. } => Some(png.as_slice()),
                Shape::TextBox { .. } => None,
            })
            .collect()
    }
}

/// A shape on a slide.
#[derive(Debug)]
pub enum Shape {
    /// A cropped picture, stored as PNG bytes.
    Picture { png: Vec<u8>, rect: ShapeRect },
    /// An editable text box.
    TextBox {
        text: String,
        rect: ShapeRect,
        style: TextStyle,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ShapeRect {
        ShapeRect {
            x: 0,
            y: 0,
            cx: 914_400,
            cy: 914_400,
        }
    }

    #[test]
    fn test_add_slide_and_shapes() {
        let mut prs = Presentation::new();
        assert_eq!(prs.slide_count(), 0);

        let slide = prs.add_slide();
        slide.add_picture(vec![1, 2, 3], rect());
        slide.add_text_box("Hello".to_string(), rect(), TextStyle::default());

        assert_eq!(prs.slide_count(), 1);
        assert_eq!(prs.slides()[0].shape_count(), 2);
    }

    #[test]
    fn test_picture_data_skips_text_boxes() {
        let mut slide = Slide::new();
        slide.add_text_box("caption".to_string(), rect(), TextStyle::default());
        slide.add_picture(vec![9], rect());
        assert_eq!(slide.picture_data(), vec![&[9u8][..]]);
    }
}
