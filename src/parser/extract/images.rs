use scraper::ElementRef;

use super::{ExtractedItem, UNTITLED};
use crate::parser::element_descendants;
use crate::urls;

/// Catch-all pass: every image in the section with its alt text as a
/// candidate name. Deliberately overlaps with the gallery/thumbnail pass; the
/// merge keeps whichever value arrived first.
pub fn extract(nodes: &[ElementRef]) -> Vec<ExtractedItem> {
    let mut items = Vec::new();
    for node in nodes {
        for img in element_descendants(*node).filter(|el| el.value().name() == "img") {
            let Some(src) = img.value().attr("src") else {
                continue;
            };
            let name = match img.value().attr("alt").map(str::trim) {
                Some(alt) if !alt.is_empty() => alt.to_string(),
                _ => UNTITLED.to_string(),
            };
            items.push(ExtractedItem {
                name,
                description: None,
                image_url: Some(urls::absolutize(src)),
            });
        }
    }
    items
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract_from(fragment: &str) -> Vec<ExtractedItem> {
        let doc = Html::parse_fragment(fragment);
        let nodes: Vec<ElementRef> = doc
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .collect();
        extract(&nodes)
    }

    #[test]
    fn alt_text_becomes_name() {
        let items = extract_from(r#"<p><img src="//x/a.png" alt=" Panneau AB1 "></p>"#);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Panneau AB1");
        assert_eq!(items[0].description, None);
        assert_eq!(items[0].image_url.as_deref(), Some("https://x/a.png"));
    }

    #[test]
    fn empty_or_missing_alt_falls_back_to_placeholder() {
        let items =
            extract_from(r#"<p><img src="//x/a.png" alt=""><img src="//x/b.png"></p>"#);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.name == UNTITLED));
    }

    #[test]
    fn image_without_src_is_skipped() {
        assert!(extract_from(r#"<p><img alt="orphan"></p>"#).is_empty());
    }
}
