//! Best-effort parsing of the model's region list.

use regex::Regex;
use slidesnap_core::Region;
use std::sync::LazyLock;

/// Regex to strip markdown code fences the model sometimes wraps
/// JSON in despite the JSON response mime type.
static FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?\s*|\s*```$").unwrap());

/// Parse the model's response text into regions, leniently.
///
/// - Markdown fences are stripped first.
/// - A body that is not a JSON array yields an empty list.
/// - Array items that fail to deserialize are skipped.
///
/// Never fails: a page the model mangles becomes a blank slide rather
/// than aborting the batch.
pub fn parse_regions(raw: &str) -> Vec<Region> {
    let cleaned = FENCE_REGEX.replace_all(raw.trim(), "");
    if cleaned.is_empty() {
        return Vec::new();
    }

    let items: Vec<serde_json::Value> = match serde_json::from_str(&cleaned) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("model response is not a JSON region array: {e}");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Region>(item) {
            Ok(region) => Some(region),
            Err(e) => {
                log::warn!("skipping malformed region: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidesnap_core::Alignment;

    const TWO_REGIONS: &str = r##"[
        {
            "type": "text_block",
            "content": "Roadmap 2026",
            "box_2d": [40, 60, 110, 940],
            "style": { "font_size": 32, "is_bold": true, "color_hex": "#222222", "alignment": "center" }
        },
        { "type": "visual_element", "box_2d": [150, 100, 850, 900] }
    ]"##;

    #[test]
    fn test_parse_plain_array() {
        let regions = parse_regions(TWO_REGIONS);
        assert_eq!(regions.len(), 2);
        match &regions[0] {
            Region::TextBlock { content, style, .. } => {
                assert_eq!(content, "Roadmap 2026");
                assert_eq!(style.alignment, Alignment::Center);
            }
            _ => panic!("expected a text block first"),
        }
        assert!(regions[1].is_visual());
    }

    #[test]
    fn test_parse_strips_markdown_fences() {
        let fenced = format!("```json\n{TWO_REGIONS}\n```");
        assert_eq!(parse_regions(&fenced).len(), 2);

        let fenced_plain = format!("```\n{TWO_REGIONS}\n```");
        assert_eq!(parse_regions(&fenced_plain).len(), 2);
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let mixed = r#"[
            { "type": "visual_element", "box_2d": [0, 0, 500, 500] },
            { "type": "word_art", "box_2d": [0, 0, 1, 1] },
            "not even an object",
            { "type": "text_block", "content": "kept", "box_2d": [0, 0, 100, 100] }
        ]"#;
        let regions = parse_regions(mixed);
        assert_eq!(regions.len(), 2);
    }

    #[test]
    fn test_non_array_bodies_yield_nothing() {
        assert!(parse_regions("").is_empty());
        assert!(parse_regions("The slide shows a chart.").is_empty());
        assert!(parse_regions(r#"{ "type": "text_block" }"#).is_empty());
    }

    #[test]
    fn test_missing_style_defaults() {
        let regions =
            parse_regions(r#"[{ "type": "text_block", "content": "x", "box_2d": [0,0,10,10] }]"#);
        match &regions[0] {
            Region::TextBlock { style, .. } => {
                assert_eq!(style.font_size, 12.0);
                assert!(!style.is_bold);
            }
            _ => panic!("expected a text block"),
        }
    }
}
