use indexmap::IndexMap;

use super::extract::ExtractedItem;

/// What is known about one sign name after merging all three extractors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergedInfo {
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// First-write-wins merge keyed by the raw extracted name.
///
/// Priority order: list items first (plain text, the most reliable names, they
/// establish the keyspace), then gallery/thumbnail items (structured captions
/// supply most descriptions and images), then loose images (last-resort image
/// attachment). A non-empty value never overwrites one already set. The
/// returned map iterates in first-insertion order.
pub fn merge(
    list_items: Vec<ExtractedItem>,
    gallery_items: Vec<ExtractedItem>,
    loose_items: Vec<ExtractedItem>,
) -> IndexMap<String, MergedInfo> {
    let mut merged: IndexMap<String, MergedInfo> = IndexMap::new();

    for item in list_items
        .into_iter()
        .chain(gallery_items)
        .chain(loose_items)
    {
        let entry = merged.entry(item.name).or_default();
        if entry.description.is_none() {
            if let Some(desc) = item.description.filter(|d| !d.is_empty()) {
                entry.description = Some(desc);
            }
        }
        if entry.image_url.is_none() {
            if let Some(url) = item.image_url.filter(|u| !u.is_empty()) {
                entry.image_url = Some(url);
            }
        }
    }

    merged
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, desc: Option<&str>, img: Option<&str>) -> ExtractedItem {
        ExtractedItem {
            name: name.to_string(),
            description: desc.map(str::to_string),
            image_url: img.map(str::to_string),
        }
    }

    #[test]
    fn gallery_fills_in_fields_for_list_name() {
        let merged = merge(
            vec![item("Cédez le passage", None, None)],
            vec![item(
                "Cédez le passage",
                Some("Give way sign"),
                Some("http://x/img.png"),
            )],
            vec![],
        );
        let info = &merged["Cédez le passage"];
        assert_eq!(info.description.as_deref(), Some("Give way sign"));
        assert_eq!(info.image_url.as_deref(), Some("http://x/img.png"));
    }

    #[test]
    fn first_description_wins() {
        let merged = merge(
            vec![],
            vec![
                item("Stop", Some("first"), Some("http://x/1.png")),
                item("Stop", Some("second"), Some("http://x/2.png")),
            ],
            vec![],
        );
        let info = &merged["Stop"];
        assert_eq!(info.description.as_deref(), Some("first"));
        assert_eq!(info.image_url.as_deref(), Some("http://x/1.png"));
    }

    #[test]
    fn loose_image_attaches_without_overwriting() {
        let merged = merge(
            vec![item("AB1", None, None)],
            vec![item("AB3", Some("desc"), Some("http://x/ab3.png"))],
            vec![item("AB1", None, Some("http://x/ab1.png"))],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["AB1"].image_url.as_deref(), Some("http://x/ab1.png"));
        assert_eq!(merged["AB1"].description, None);
        assert_eq!(merged["AB3"].image_url.as_deref(), Some("http://x/ab3.png"));
    }

    #[test]
    fn names_keep_first_insertion_order() {
        let merged = merge(
            vec![item("b", None, None), item("a", None, None)],
            vec![item("c", None, None), item("a", None, Some("u"))],
            vec![],
        );
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn name_with_no_data_still_gets_a_record() {
        let merged = merge(vec![item("Lonely", None, None)], vec![], vec![]);
        assert_eq!(merged["Lonely"], MergedInfo::default());
    }

    #[test]
    fn empty_strings_do_not_claim_a_slot() {
        let merged = merge(
            vec![],
            vec![item("X", Some(""), Some("")), item("X", Some("real"), Some("u"))],
            vec![],
        );
        assert_eq!(merged["X"].description.as_deref(), Some("real"));
        assert_eq!(merged["X"].image_url.as_deref(), Some("u"));
    }
}
