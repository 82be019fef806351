use std::sync::LazyLock;

use regex::Regex;

static REFINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[REFINE:([^\]]*)\]").unwrap());

/// Assistant reply with any `[REFINE:<query>]` marker removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReply {
    pub visible_text: String,
    pub refined_query: Option<String>,
}

impl ExtractedReply {
    pub fn should_refine_search(&self) -> bool {
        self.refined_query.is_some()
    }
}

/// The first non-empty marker provides the query; every marker is stripped
/// from the visible text.
pub fn extract_refine_marker(text: &str) -> ExtractedReply {
    let refined_query = REFINE_MARKER
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .find(|query| !query.is_empty());

    let visible_text = REFINE_MARKER.replace_all(text, "").trim().to_string();

    ExtractedReply {
        visible_text,
        refined_query,
    }
}
