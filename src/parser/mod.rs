pub mod extract;
pub mod merge;
pub mod sections;

use scraper::{ElementRef, Html};
use tracing::warn;

use crate::db::PanneauRecord;
use crate::sources::Source;
use crate::urls;

/// Four-pass pipeline: HTML → sections → three extractors → merge → records.
pub fn parse_page(html: &str, source: &Source) -> Vec<PanneauRecord> {
    let document = Html::parse_document(html);
    let Some(content) = content_root(&document) else {
        warn!("No mw-parser-output container on {}", source.url);
        return Vec::new();
    };

    let mut records = Vec::new();
    for section in sections::split_sections(content) {
        let list_items = extract::lists::extract(&section.nodes);
        let gallery_items = extract::gallery::extract(&section.nodes);
        let loose_items = extract::images::extract(&section.nodes);
        for (name, info) in merge::merge(list_items, gallery_items, loose_items) {
            records.push(build_record(name, info, source));
        }
    }
    records
}

/// The wiki body lives under a div whose class contains `mw-parser-output`.
fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    element_descendants(document.root_element())
        .find(|el| el.value().name() == "div" && class_contains(*el, "mw-parser-output"))
}

fn build_record(name: String, info: merge::MergedInfo, source: &Source) -> PanneauRecord {
    let description = info.description.unwrap_or_else(|| {
        format!(
            "{} — panneau issu du Code de la route ({}).",
            name,
            source.sign_type.label()
        )
    });
    // Store the full-resolution original, not the wiki thumbnail.
    let image_url = info.image_url.map(|u| urls::original_image_url(&u));
    PanneauRecord {
        name,
        description,
        sign_type: source.sign_type,
        source_url: source.url.clone(),
        image_url,
        image_path: None,
    }
}

// ── Shared DOM helpers ──

/// Class-attribute substring match. This is a heuristic against inconsistent
/// wiki markup (`gallery`, `gallerybox`, `thumbinner`, ...), not a structural
/// guarantee.
pub(crate) fn class_contains(el: ElementRef, needle: &str) -> bool {
    el.value().attr("class").is_some_and(|c| c.contains(needle))
}

/// Visible text with internal whitespace collapsed to single spaces.
pub(crate) fn collapsed_text(el: ElementRef) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The element and all element descendants, document order.
pub(crate) fn element_descendants<'a>(
    el: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().filter_map(ElementRef::wrap)
}

/// Element descendants only, excluding the element itself. Needed where the
/// container was found by the same class heuristic as its entries, so that a
/// `gallerybox` is not treated as a gallery containing itself.
pub(crate) fn strict_descendants<'a>(
    el: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

// ── Tests ──
