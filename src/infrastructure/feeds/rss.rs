use crate::domain::entities::feed_entry::FeedEntry;
use crate::domain::error::SourceError;
use crate::domain::ports::feed_reader::FeedReader;
use async_trait::async_trait;
use feed_rs::model::Link;
use feed_rs::parser;
use tracing::debug;

/// RSS 0.9x/1.0/2.0, Atom and JSON Feed over HTTP.
pub struct HttpFeedReader {
    client: reqwest::Client,
}

impl HttpFeedReader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedReader for HttpFeedReader {
    async fn read(&self, url: &str) -> Result<Vec<FeedEntry>, SourceError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "feed returned {} for {url}",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        debug!(url, bytes = bytes.len(), "feed downloaded");
        parse_feed(&bytes)
    }
}

/// Parses a feed document into entries, in document order.
pub fn parse_feed(content: &[u8]) -> Result<Vec<FeedEntry>, SourceError> {
    let feed = parser::parse(content)
        .map_err(|e| SourceError::Parse(format!("Failed to parse feed: {e}")))?;

    Ok(feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| clean_text(&t.content));
            let link = article_link(entry.links);
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .map(|s| clean_text(&s));
            FeedEntry::new(title, link, summary)
        })
        .collect())
}

/// The entry's own page: the first `alternate` (or untyped) link, falling
/// back to whatever link comes first.
fn article_link(links: Vec<Link>) -> Option<String> {
    let pos = links
        .iter()
        .position(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .unwrap_or(0);
    links.into_iter().nth(pos).map(|l| l.href)
}

/// Drops markup and collapses whitespace. A `<` that never closes is kept
/// as text.
pub fn clean_text(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut tag = String::new();
    for c in raw.chars() {
        if tag.is_empty() {
            if c == '<' {
                tag.push(c);
            } else {
                text.push(c);
            }
        } else if c == '>' {
            tag.clear();
            text.push(' ');
        } else if c == '<' {
            text.push_str(&tag);
            tag.clear();
            tag.push(c);
        } else {
            tag.push(c);
        }
    }
    text.push_str(&tag);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
