//! The fixed instruction prompt sent with every slide image.

/// Instruction prompt for slide layout analysis.
///
/// The grouping rule is load-bearing: without it the model splits one
/// infographic into a dozen tiny crops that reassemble badly.
pub const LAYOUT_PROMPT: &str = r##"Analyze this slide image for PowerPoint reconstruction.

Task: Identify "text_block" and "visual_element".

CRITICAL RULE FOR IMAGES:
If there is a complex diagram, infographic, or overlapping illustration (e.g., a central timeline with icons, or a heart with waves), GROUP THEM into ONE LARGE "visual_element".
DO NOT split a complex chart into 10 small icons. Capture the WHOLE context area.

Return JSON array:
[
    {
        "type": "text_block",
        "content": "Text",
        "box_2d": [ymin, xmin, ymax, xmax],
        "style": { "font_size": 12, "is_bold": false, "color_hex": "#000000", "alignment": "left" }
    },
    {
        "type": "visual_element",
        "box_2d": [ymin, xmin, ymax, xmax]
    }
]
"##;
