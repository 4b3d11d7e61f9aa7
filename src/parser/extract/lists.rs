use scraper::ElementRef;

use super::ExtractedItem;
use crate::parser::{collapsed_text, element_descendants};

/// Pull one item per `<li>` out of every list in the section, descending into
/// nested lists. Lists carry names only; descriptions and images come from the
/// other strategies.
pub fn extract(nodes: &[ElementRef]) -> Vec<ExtractedItem> {
    let mut items = Vec::new();
    for node in nodes {
        if !matches!(node.value().name(), "ul" | "ol") {
            continue;
        }
        for li in element_descendants(*node).filter(|el| el.value().name() == "li") {
            let text = collapsed_text(li);
            if text.is_empty() {
                continue;
            }
            items.push(ExtractedItem {
                name: text,
                description: None,
                image_url: None,
            });
        }
    }
    items
}

// ── Tests ──
