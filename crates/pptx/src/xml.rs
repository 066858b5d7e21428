//! Slide and presentation XML generation.
//!
//! Parts are built as strings with escaping applied to all text content.
//! Relationship IDs are deterministic: the presentation references its
//! master as rId1 and slide N as rId(N+1); each slide references its
//! layout as rId1 and its pictures as rId2 onward.

use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;
use slidesnap_core::{Alignment, ShapeRect, TextStyle};

use crate::model::{Presentation, Shape, Slide};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Generate ppt/presentation.xml.
pub(crate) fn presentation_xml(prs: &Presentation) -> String {
    let mut xml = String::with_capacity(1024);

    xml.push_str(XML_DECL);
    xml.push_str(r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

    xml.push_str("<p:sldMasterIdLst>");
    xml.push_str(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#);
    xml.push_str("</p:sldMasterIdLst>");

    if prs.slide_count() > 0 {
        xml.push_str("<p:sldIdLst>");
        for index in 0..prs.slide_count() {
            let _ = write!(
                xml,
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                256 + index,
                index + 2
            );
        }
        xml.push_str("</p:sldIdLst>");
    }

    let canvas = prs.canvas();
    let _ = write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        canvas.width_emu, canvas.height_emu
    );
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");

    xml
}

/// Generate ppt/_rels/presentation.xml.rels.
pub(crate) fn presentation_rels_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#);
    for index in 0..slide_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            index + 2,
            index + 1
        );
    }
    xml.push_str("</Relationships>");

    xml
}

/// Generate one ppt/slides/slideN.xml.
pub(crate) fn slide_xml(slide: &Slide) -> String {
    let mut xml = String::with_capacity(4096);

    xml.push_str(XML_DECL);
    xml.push_str(r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#);

    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");

    // Required group shape boilerplate.
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr>");
    xml.push_str("<a:xfrm>");
    xml.push_str(r#"<a:off x="0" y="0"/>"#);
    xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
    xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
    xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
    xml.push_str("</a:xfrm>");
    xml.push_str("</p:grpSpPr>");

    // Shape id 1 is the group; pictures reference rId2.. in shape order.
    let mut image_rel_index = 0;
    for (index, shape) in slide.shapes().iter().enumerate() {
        let shape_id = index as u32 + 2;
        match shape {
            Shape::Picture { rect, .. } => {
                image_rel_index += 1;
                write_picture(&mut xml, shape_id, rect, image_rel_index + 1);
            }
            Shape::TextBox { text, rect, style } => {
                write_text_box(&mut xml, shape_id, text, rect, style);
            }
        }
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    xml
}

/// Generate one ppt/slides/_rels/slideN.xml.rels.
///
/// `media_names` are the archive file names of this slide's pictures,
/// in shape order (e.g. `image3.png`).
pub(crate) fn slide_rels_xml(media_names: &[String]) -> String {
    let mut xml = String::with_capacity(512);

    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#);
    for (index, name) in media_names.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/{}"/>"#,
            index + 2,
            name
        );
    }
    xml.push_str("</Relationships>");

    xml
}

fn write_xfrm(xml: &mut String, rect: &ShapeRect) {
    xml.push_str("<a:xfrm>");
    let _ = write!(xml, r#"<a:off x="{}" y="{}"/>"#, rect.x, rect.y);
    let _ = write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, rect.cx, rect.cy);
    xml.push_str("</a:xfrm>");
}

fn write_picture(xml: &mut String, shape_id: u32, rect: &ShapeRect, rel_index: usize) {
    xml.push_str("<p:pic>");
    xml.push_str("<p:nvPicPr>");
    let _ = write!(
        xml,
        r#"<p:cNvPr id="{shape_id}" name="Picture {shape_id}"/>"#
    );
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvPicPr>");

    xml.push_str("<p:blipFill>");
    let _ = write!(xml, r#"<a:blip r:embed="rId{rel_index}"/>"#);
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
    xml.push_str("</p:blipFill>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, rect);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");
    xml.push_str("</p:pic>");
}

fn write_text_box(xml: &mut String, shape_id: u32, text: &str, rect: &ShapeRect, style: &TextStyle) {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    let _ = write!(
        xml,
        r#"<p:cNvPr id="{shape_id}" name="Text Box {shape_id}"/>"#
    );
    xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, rect);
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    // Word wrap inside the box, anchored to the top like the source layout.
    xml.push_str(r#"<a:bodyPr wrap="square" anchor="t"/>"#);
    xml.push_str("<a:lstStyle/>");

    let size_hundredths = (style.clamped_font_size() * 100.0) as u32;
    let color = style.color().to_drawingml();

    // One paragraph per source line keeps the text editable line-by-line.
    let mut lines = text.lines().peekable();
    if lines.peek().is_none() {
        xml.push_str("<a:p/>");
    }
    for line in lines {
        xml.push_str("<a:p>");
        match style.alignment {
            Alignment::Center => xml.push_str(r#"<a:pPr algn="ctr"/>"#),
            Alignment::Right => xml.push_str(r#"<a:pPr algn="r"/>"#),
            Alignment::Left => {}
        }
        xml.push_str("<a:r>");
        let _ = write!(xml, r#"<a:rPr lang="en-US" dirty="0" sz="{size_hundredths}""#);
        if style.is_bold {
            xml.push_str(r#" b="1""#);
        }
        xml.push('>');
        let _ = write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{color}"/></a:solidFill>"#
        );
        xml.push_str("</a:rPr>");
        let _ = write!(xml, "<a:t>{}</a:t>", escape(line));
        xml.push_str("</a:r>");
        xml.push_str("</a:p>");
    }

    xml.push_str("</p:txBody>");
    xml.push_str("</p:sp>");
}
