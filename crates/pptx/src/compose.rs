//! Rebuilding one analyzed image as a slide.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use slidesnap_core::{padded_crop, text_placement, Error, Region, Result};

use crate::model::Presentation;

/// Add one slide reconstructing `image` from its analyzed `regions`.
///
/// Visual regions go down first as cropped pictures so the text boxes
/// layer above them. Degenerate regions are skipped; a region whose
/// crop fails to encode is dropped with a warning rather than failing
/// the slide. An empty region list yields a blank slide.
pub fn compose_slide(prs: &mut Presentation, image: &DynamicImage, regions: &[Region]) {
    let canvas = prs.canvas();
    let (img_w, img_h) = (image.width(), image.height());
    let slide = prs.add_slide();

    for region in regions.iter().filter(|r| r.is_visual()) {
        let Some(crop) = padded_crop(region.bounds(), img_w, img_h) else {
            log::debug!("skipping degenerate visual region {:?}", region.bounds());
            continue;
        };

        let (x, y, w, h) = crop.pixel_rect();
        let cropped = image.crop_imm(x, y, w, h);

        match encode_png(&cropped) {
            Ok(png) => slide.add_picture(png, crop.placement(img_w, img_h, &canvas)),
            Err(e) => log::warn!("dropping visual region: {e}"),
        }
    }

    for region in regions {
        if let Region::TextBlock {
            content,
            box_2d,
            style,
        } = region
        {
            if content.trim().is_empty() {
                continue;
            }
            let rect = text_placement(box_2d, &canvas);
            if rect.cx <= 0 || rect.cy <= 0 {
                log::debug!("skipping degenerate text region {box_2d:?}");
                continue;
            }
            slide.add_text_box(content.clone(), rect, style.clone());
        }
    }
}

fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| Error::ImageEncodeError(format!("crop: {e}")))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;
    use slidesnap_core::{BoundingBox, TextStyle};

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            200,
            100,
            image::Rgba([200, 60, 60, 255]),
        ))
    }

    fn bbox(ymin: f64, xmin: f64, ymax: f64, xmax: f64) -> BoundingBox {
        BoundingBox {
            ymin,
            xmin,
            ymax,
            xmax,
        }
    }

    #[test]
    fn test_pictures_layer_below_text() {
        let mut prs = Presentation::new();
        let regions = vec![
            Region::TextBlock {
                content: "Title".to_string(),
                box_2d: bbox(0.0, 0.0, 100.0, 1000.0),
                style: TextStyle::default(),
            },
            Region::VisualElement {
                box_2d: bbox(200.0, 200.0, 800.0, 800.0),
            },
        ];

        compose_slide(&mut prs, &test_image(), &regions);

        let shapes = prs.slides()[0].shapes();
        assert_eq!(shapes.len(), 2);
        // The picture comes first even though the text region was listed first.
        assert!(matches!(shapes[0], Shape::Picture { .. }));
        assert!(matches!(shapes[1], Shape::TextBox { .. }));
    }

    #[test]
    fn test_cropped_picture_is_decodable_png() {
        let mut prs = Presentation::new();
        let regions = vec![Region::VisualElement {
            box_2d: bbox(0.0, 0.0, 1000.0, 500.0),
        }];

        compose_slide(&mut prs, &test_image(), &regions);

        match &prs.slides()[0].shapes()[0] {
            Shape::Picture { png, rect } => {
                let decoded = image::load_from_memory(png).unwrap();
                // Left half of a 200x100 image, plus right-side padding.
                assert!(decoded.width() >= 100);
                assert!(decoded.width() < 110);
                assert_eq!(decoded.height(), 100);
                assert_eq!(rect.x, 0);
                assert_eq!(rect.y, 0);
            }
            _ => panic!("expected a picture shape"),
        }
    }

    #[test]
    fn test_empty_and_degenerate_regions_yield_blank_slide() {
        let mut prs = Presentation::new();
        let regions = vec![
            Region::VisualElement {
                box_2d: BoundingBox::default(),
            },
            Region::TextBlock {
                content: "   ".to_string(),
                box_2d: bbox(0.0, 0.0, 100.0, 100.0),
                style: TextStyle::default(),
            },
            Region::TextBlock {
                content: "no area".to_string(),
                box_2d: bbox(100.0, 100.0, 100.0, 100.0),
                style: TextStyle::default(),
            },
        ];

        compose_slide(&mut prs, &test_image(), &regions);

        assert_eq!(prs.slide_count(), 1);
        assert_eq!(prs.slides()[0].shape_count(), 0);
    }

    #[test]
    fn test_no_regions_still_adds_a_slide() {
        let mut prs = Presentation::new();
        compose_slide(&mut prs, &test_image(), &[]);
        assert_eq!(prs.slide_count(), 1);
        assert_eq!(prs.slides()[0].shape_count(), 0);
    }
}
