use crate::domain::entities::feed_entry::FeedEntry;
use crate::domain::entities::quote::Quote;
use serde::Serialize;

pub const EMPTY_DOCUMENT: &str = "（取得できたデータはありません）";

/// Section kinds in rendering order: quotes always precede headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Quotes,
    Headlines,
}

impl SectionKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Quotes => "【本日の数値データ】",
            Self::Headlines => "【ニュース見出し】",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
    /// Set when the source failed; rendered inline so the summarizer sees it.
    pub failure: Option<String>,
}

impl Section {
    /// Quote section. Marked failed when no instrument produced a price.
    pub fn quotes(quotes: &[Quote]) -> Self {
        let failure = if quotes.iter().any(Quote::is_available) {
            None
        } else {
            Some("価格データを取得できませんでした".to_string())
        };
        Self {
            kind: SectionKind::Quotes,
            lines: quotes.iter().map(ToString::to_string).collect(),
            failure,
        }
    }

    /// Headline section from whatever entries were parsed plus the feed
    /// diagnostic, if any.
    pub fn headlines(entries: &[FeedEntry], diagnostic: Option<String>) -> Self {
        Self {
            kind: SectionKind::Headlines,
            lines: entries
                .iter()
                .map(|e| format!("- {}: {}", e.title, e.summary))
                .collect(),
            failure: diagnostic,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(self.kind.heading());
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if let Some(reason) = &self.failure {
            out.push_str("※ 取得失敗: ");
            out.push_str(reason);
            out.push('\n');
        }
    }
}

/// The text handed to the summarizer, composed of labeled sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectedDocument {
    sections: Vec<Section>,
}

impl CollectedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section, replacing any existing section of the same kind.
    pub fn push(&mut self, section: Section) {
        self.sections.retain(|s| s.kind != section.kind);
        self.sections.push(section);
        self.sections.sort_by_key(|s| s.kind);
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.push(section);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Failure reasons of degraded sections, in document order.
    pub fn failures(&self) -> Vec<(SectionKind, &str)> {
        self.sections
            .iter()
            .filter_map(|s| s.failure.as_deref().map(|f| (s.kind, f)))
            .collect()
    }

    pub fn render(&self) -> String {
        if self.sections.is_empty() {
            return format!("{EMPTY_DOCUMENT}\n");
        }
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            section.render_into(&mut out);
        }
        out
    }
}
