pub mod gallery;
pub mod images;
pub mod lists;

/// Name assigned when a structure carries an image but no usable caption or
/// alt text. Untitled entries collapse into one record at merge time.
pub const UNTITLED: &str = "(Sans titre)";

/// One candidate sign pulled from a section by a single extractor strategy.
/// The three strategies run independently over the same nodes; overlap is
/// resolved later by the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// ── Tests ──
