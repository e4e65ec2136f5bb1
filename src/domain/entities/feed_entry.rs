use serde::Serialize;

pub const NO_ABSTRACT: &str = "(概要なし)";
pub const NO_TITLE: &str = "(無題)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub summary: String,
}

impl FeedEntry {
    /// Builds an entry, substituting placeholders for blank fields.
    pub fn new(title: Option<String>, link: Option<String>, summary: Option<String>) -> Self {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Self {
            title: non_blank(title).unwrap_or_else(|| NO_TITLE.to_string()),
            link: link.unwrap_or_default(),
            summary: non_blank(summary).unwrap_or_else(|| NO_ABSTRACT.to_string()),
        }
    }

    /// Text handed to the summarizer for a single-entry summary.
    pub fn as_document_text(&self) -> String {
        format!("タイトル: {}\n概要: {}", self.title, self.summary)
    }
}
