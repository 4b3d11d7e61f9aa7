use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]+").unwrap());

const MAX_FILENAME_LEN: usize = 200;

/// Rewrite scheme-relative wiki URLs (`//host/path`) to https.
pub fn absolutize(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{}", rest)
    } else {
        url.to_string()
    }
}

/// Resolve a Wikimedia thumbnail URL to the un-scaled original.
///
/// Thumbnails look like `.../thumb/a/b/File.png/120px-File.png`; dropping the
/// `/thumb/` segment and the trailing `<width>px-` component points at the
/// original. Anything without `/thumb/` is returned unchanged.
pub fn original_image_url(url: &str) -> String {
    if let Some((head, tail)) = url.split_once("/thumb/") {
        if let Some((path, _sized)) = tail.rsplit_once('/') {
            return format!("{}/{}", head, path);
        }
    }
    url.to_string()
}

/// Filesystem-safe filename: runs of anything outside `[A-Za-z0-9_.-]` become
/// a single `_`, capped at 200 chars.
pub fn sanitize_filename(name: &str) -> String {
    let safe = UNSAFE_RE.replace_all(name.trim(), "_").into_owned();
    safe.chars().take(MAX_FILENAME_LEN).collect()
}

/// Last path segment of a URL, for deriving a local filename.
pub fn filename_from_url(url: &str) -> &str {
    match url.rsplit('/').next() {
        Some(seg) if !seg.is_empty() => seg,
        _ => "image",
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_relative_becomes_https() {
        assert_eq!(
            absolutize("//upload.example.org/x.png"),
            "https://upload.example.org/x.png"
        );
    }

    #[test]
    fn absolute_url_unchanged() {
        assert_eq!(absolutize("https://a/b.png"), "https://a/b.png");
        assert_eq!(absolutize("/wiki/relative"), "/wiki/relative");
    }

    #[test]
    fn thumb_url_resolves_to_original() {
        let thumb = "https://upload.wikimedia.org/wikipedia/commons/thumb/a/b/Panneau_AB25.png/120px-Panneau_AB25.png";
        assert_eq!(
            original_image_url(thumb),
            "https://upload.wikimedia.org/wikipedia/commons/a/b/Panneau_AB25.png"
        );
    }

    #[test]
    fn non_thumb_url_unchanged() {
        let url = "https://upload.wikimedia.org/wikipedia/commons/a/b/Panneau_AB25.png";
        assert_eq!(original_image_url(url), url);
    }

    #[test]
    fn sanitize_keeps_only_safe_chars() {
        let out = sanitize_filename("Panneau B14 (50 km/h).png");
        assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c)));
        assert!(out.ends_with(".png"));
        assert_eq!(out, "Panneau_B14_50_km_h_.png");
    }

    #[test]
    fn sanitize_truncates_long_names() {
        let long = "a".repeat(300) + ".png";
        assert_eq!(sanitize_filename(&long).len(), 200);
    }

    #[test]
    fn filename_from_url_takes_last_segment() {
        assert_eq!(filename_from_url("https://a/b/c.png"), "c.png");
        assert_eq!(filename_from_url("https://a/b/"), "image");
    }
}
