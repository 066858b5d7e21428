//! OPC package assembly.
//!
//! Serializes a [`Presentation`] into the .pptx ZIP layout:
//! `[Content_Types].xml`, the relationship graph, the static
//! master/layout/theme parts, per-slide XML, and the cropped picture
//! media parts.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use slidesnap_core::{Error, Result};

use crate::model::Presentation;
use crate::{template, xml};

/// Serialize the presentation into .pptx bytes.
pub fn to_bytes(prs: &Presentation) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    write_part(&mut zip, options, "[Content_Types].xml", content_types_xml(prs).as_bytes())?;
    write_part(&mut zip, options, "_rels/.rels", template::ROOT_RELS.as_bytes())?;
    write_part(&mut zip, options, "docProps/core.xml", template::CORE_PROPS.as_bytes())?;
    write_part(&mut zip, options, "docProps/app.xml", template::APP_PROPS.as_bytes())?;

    write_part(
        &mut zip,
        options,
        "ppt/presentation.xml",
        xml::presentation_xml(prs).as_bytes(),
    )?;
    write_part(
        &mut zip,
        options,
        "ppt/_rels/presentation.xml.rels",
        xml::presentation_rels_xml(prs.slide_count()).as_bytes(),
    )?;

    write_part(
        &mut zip,
        options,
        "ppt/slideMasters/slideMaster1.xml",
        template::SLIDE_MASTER.as_bytes(),
    )?;
    write_part(
        &mut zip,
        options,
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        template::SLIDE_MASTER_RELS.as_bytes(),
    )?;
    write_part(
        &mut zip,
        options,
        "ppt/slideLayouts/slideLayout1.xml",
        template::SLIDE_LAYOUT.as_bytes(),
    )?;
    write_part(
        &mut zip,
        options,
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        template::SLIDE_LAYOUT_RELS.as_bytes(),
    )?;
    write_part(&mut zip, options, "ppt/theme/theme1.xml", template::THEME.as_bytes())?;

    // Slides and their media. Media file names are numbered across the
    // whole package; each slide's rels list only its own pictures.
    let mut media_counter = 0usize;
    for (index, slide) in prs.slides().iter().enumerate() {
        let slide_number = index + 1;

        let mut media_names = Vec::new();
        for png in slide.picture_data() {
            media_counter += 1;
            let name = format!("image{media_counter}.png");
            write_part(&mut zip, options, &format!("ppt/media/{name}"), png)?;
            media_names.push(name);
        }

        write_part(
            &mut zip,
            options,
            &format!("ppt/slides/slide{slide_number}.xml"),
            xml::slide_xml(slide).as_bytes(),
        )?;
        write_part(
            &mut zip,
            options,
            &format!("ppt/slides/_rels/slide{slide_number}.xml.rels"),
            xml::slide_rels_xml(&media_names).as_bytes(),
        )?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| Error::PackageError(format!("failed to finalize archive: {e}")))?;
    Ok(cursor.into_inner())
}

/// Serialize the presentation and write it to a file.
pub fn save(prs: &Presentation, path: &Path) -> Result<()> {
    let bytes = to_bytes(prs)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_part(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    name: &str,
    data: &[u8],
) -> Result<()> {
    zip.start_file(name, options)
        .map_err(|e| Error::PackageError(format!("failed to start part {name}: {e}")))?;
    zip.write_all(data)?;
    Ok(())
}

/// Generate `[Content_Types].xml` with one override per slide.
fn content_types_xml(prs: &Presentation) -> String {
    let mut xml = String::with_capacity(1024);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );

    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);

    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);

    for index in 0..prs.slide_count() {
        let _ = write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            index + 1
        );
    }

    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);

    xml.push_str("</Types>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;
    use slidesnap_core::{ShapeRect, TextStyle};
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_presentation() -> Presentation {
        let mut prs = Presentation::new();
        let slide = prs.add_slide();
        slide.add_picture(
            tiny_png(),
            ShapeRect {
                x: 0,
                y: 0,
                cx: 6_096_000,
                cy: 6_858_000,
            },
        );
        slide.add_text_box(
            "Reconstructed".to_string(),
            ShapeRect {
                x: 914_400,
                y: 457_200,
                cx: 4_572_000,
                cy: 914_400,
            },
            TextStyle::default(),
        );
        prs.add_slide();
        prs
    }

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 128, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_expected_parts() {
        let bytes = to_bytes(&sample_presentation()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/slide2.xml",
            "ppt/media/image1.png",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing part: {name}");
        }
    }

    #[test]
    fn test_content_types_cover_every_slide() {
        let bytes = to_bytes(&sample_presentation()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let content = read_part(&mut archive, "[Content_Types].xml");

        assert!(content.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(content.contains(r#"PartName="/ppt/slides/slide2.xml""#));
        assert!(content.contains(r#"Extension="png""#));
    }

    #[test]
    fn test_media_part_is_the_original_png() {
        let bytes = to_bytes(&sample_presentation()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let mut file = archive.by_name("ppt/media/image1.png").unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        assert_eq!(data, tiny_png());
    }

    #[test]
    fn test_slide_xml_parses_and_holds_the_text() {
        let bytes = to_bytes(&sample_presentation()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let content = read_part(&mut archive, "ppt/slides/slide1.xml");

        // Walk the XML the way the rest of the codebase reads slides.
        let mut reader = Reader::from_str(&content);
        reader.trim_text(true);

        let mut texts = Vec::new();
        let mut picture_count = 0;
        let mut in_text = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"a:t" => in_text = true,
                    b"p:pic" => picture_count += 1,
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_text => {
                    texts.push(e.unescape().unwrap().to_string());
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"a:t" => in_text = false,
                Ok(Event::Eof) => break,
                Err(e) => panic!("generated slide XML does not parse: {e}"),
                _ => {}
            }
        }

        assert_eq!(picture_count, 1);
        assert_eq!(texts, vec!["Reconstructed"]);
    }

    #[test]
    fn test_slide_rels_match_media_numbering() {
        let bytes = to_bytes(&sample_presentation()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        let rels = read_part(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Target="../media/image1.png""#));

        // The second slide has no pictures, only the layout relationship.
        let rels2 = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels2.contains("slideLayout1.xml"));
        assert!(!rels2.contains("media"));
    }

    #[test]
    fn test_save_writes_a_zip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");

        save(&sample_presentation(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // OPC packages are plain ZIP archives.
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
