use scraper::ElementRef;

use super::collapsed_text;

/// One slice of the page: the nodes between two headings, labelled with the
/// most recent h2 (category) and h3 (subcategory). Transient, consumed by the
/// extractors right away.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub nodes: Vec<ElementRef<'a>>,
}

/// Fold the content container's element children into heading-delimited
/// sections. An h2 flushes the buffer under the *previous* labels, then sets
/// the category and clears the subcategory; an h3 flushes and sets only the
/// subcategory. Non-element nodes are skipped. Every non-heading element ends
/// up in exactly one section, in document order.
pub fn split_sections(content: ElementRef<'_>) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut category: Option<String> = None;
    let mut subcategory: Option<String> = None;
    let mut buffer: Vec<ElementRef> = Vec::new();

    for child in content.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "h2" => {
                flush(&mut sections, &category, &subcategory, &mut buffer);
                category = heading_text(child);
                subcategory = None;
            }
            "h3" => {
                flush(&mut sections, &category, &subcategory, &mut buffer);
                subcategory = heading_text(child);
            }
            _ => buffer.push(child),
        }
    }
    flush(&mut sections, &category, &subcategory, &mut buffer);

    sections
}

fn flush<'a>(
    sections: &mut Vec<Section<'a>>,
    category: &Option<String>,
    subcategory: &Option<String>,
    buffer: &mut Vec<ElementRef<'a>>,
) {
    if buffer.is_empty() {
        return;
    }
    sections.push(Section {
        category: category.clone(),
        subcategory: subcategory.clone(),
        nodes: std::mem::take(buffer),
    });
}

fn heading_text(el: ElementRef<'_>) -> Option<String> {
    let text = collapsed_text(el);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ── Tests ──
