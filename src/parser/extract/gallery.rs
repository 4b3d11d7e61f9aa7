use scraper::ElementRef;

use super::{ExtractedItem, UNTITLED};
use crate::parser::{class_contains, collapsed_text, element_descendants, strict_descendants};
use crate::urls;

/// Extract `(name, description, image_url)` from gallery boxes and captioned
/// thumbnails. Captions are split on the first period: the sentence before is
/// the sign name, anything after its description.
pub fn extract(nodes: &[ElementRef]) -> Vec<ExtractedItem> {
    let mut items = Vec::new();

    // Image galleries: any container whose class mentions "gallery", one entry
    // per "gallerybox" descendant. Name is required here.
    for node in nodes {
        for gallery in element_descendants(*node).filter(|el| class_contains(*el, "gallery")) {
            for item in
                strict_descendants(gallery).filter(|el| class_contains(*el, "gallerybox"))
            {
                let image_url = first_image_url(item);
                let (name, description) = match caption_div(item, "gallerytext") {
                    Some(caption) => split_caption(&collapsed_text(caption)),
                    None => (String::new(), None),
                };
                if name.is_empty() {
                    continue;
                }
                items.push(ExtractedItem {
                    name,
                    description,
                    image_url,
                });
            }
        }
    }

    // Captioned thumbnails ("thumb" divs). An image without any caption still
    // counts, under the untitled placeholder.
    for node in nodes {
        for thumb in element_descendants(*node)
            .filter(|el| el.value().name() == "div" && class_contains(*el, "thumb"))
        {
            let image_url = first_image_url(thumb);
            let (name, description) = match caption_div(thumb, "thumbcaption") {
                Some(caption) => split_caption(&collapsed_text(caption)),
                None => (String::new(), None),
            };
            if name.is_empty() && image_url.is_none() {
                continue;
            }
            let name = if name.is_empty() {
                UNTITLED.to_string()
            } else {
                name
            };
            items.push(ExtractedItem {
                name,
                description,
                image_url,
            });
        }
    }

    items
}

/// First period wins: `"Stop. Octogone."` → ("Stop", Some("Octogone.")).
/// No period: the whole caption is the name.
pub fn split_caption(caption: &str) -> (String, Option<String>) {
    match caption.split_once('.') {
        Some((name, rest)) => {
            let rest = rest.trim();
            let description = if rest.is_empty() {
                None
            } else {
                Some(rest.to_string())
            };
            (name.trim().to_string(), description)
        }
        None => (caption.trim().to_string(), None),
    }
}

fn first_image_url(el: ElementRef) -> Option<String> {
    element_descendants(el)
        .find(|e| e.value().name() == "img")
        .and_then(|img| img.value().attr("src"))
        .map(urls::absolutize)
}

fn caption_div<'a>(el: ElementRef<'a>, class_needle: &str) -> Option<ElementRef<'a>> {
    element_descendants(el)
        .find(|e| e.value().name() == "div" && class_contains(*e, class_needle))
}

// ── Tests ──
