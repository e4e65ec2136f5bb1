use crate::domain::error::PublishError;
use crate::domain::ports::publisher::{PublishOutcome, Publisher};
use crate::domain::values::publish_target::{ParentContainer, StructuredPageTarget};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2022-06-28";
pub const HEADING: &str = "本日の概況";
/// Notion caps a single rich-text run at 2000 characters.
const RICH_TEXT_LIMIT: usize = 2000;

/// Creates one page per publish under a database or page parent.
pub struct NotionPublisher {
    client: reqwest::Client,
    target: StructuredPageTarget,
    base_url: String,
}

impl NotionPublisher {
    pub fn new(
        target: StructuredPageTarget,
        base_url: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            target,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    #[serde(default)]
    url: Option<String>,
}

fn rich_text(text: &str) -> Vec<Value> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![json!({ "type": "text", "text": { "content": "" } })];
    }
    chars
        .chunks(RICH_TEXT_LIMIT)
        .map(|chunk| {
            let content: String = chunk.iter().collect();
            json!({ "type": "text", "text": { "content": content } })
        })
        .collect()
}

/// Request body for `POST /v1/pages`: title property plus a heading block
/// followed by one paragraph block.
pub fn page_payload(
    parent: &ParentContainer,
    title: &str,
    heading: &str,
    body: &str,
) -> Result<Value, PublishError> {
    let id = parent
        .id()
        .filter(|id| !id.trim().is_empty())
        .ok_or(PublishError::MissingCredential("NOTION_PAGE_ID"))?;

    let title_value = json!({ "title": rich_text(title) });
    let (parent_value, properties) = match parent {
        ParentContainer::Database { title_field, .. } => (
            json!({ "database_id": id }),
            json!({ title_field.as_str(): title_value }),
        ),
        ParentContainer::Page { .. } => (json!({ "page_id": id }), json!({ "title": title_value })),
    };

    Ok(json!({
        "parent": parent_value,
        "properties": properties,
        "children": [
            {
                "object": "block",
                "type": "heading_2",
                "heading_2": { "rich_text": rich_text(heading) }
            },
            {
                "object": "block",
                "type": "paragraph",
                "paragraph": { "rich_text": rich_text(body) }
            }
        ]
    }))
}

/// Maps a Notion error response onto the publish error taxonomy. The
/// message text is what tells a wrong title column apart from a missing
/// connection grant.
pub fn classify_error(status: u16, body: &str, parent: &ParentContainer) -> PublishError {
    let parsed: Option<NotionErrorBody> = serde_json::from_str(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone()).unwrap_or_default();
    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string());

    if message.contains("Could not find property") || message.contains("is not a property that exists") {
        let field = match parent {
            ParentContainer::Database { title_field, .. } => title_field.clone(),
            ParentContainer::Page { .. } => "title".to_string(),
        };
        return PublishError::TitleFieldMismatch { field };
    }
    if code == "object_not_found"
        || message.contains("Could not find page")
        || message.contains("Could not find database")
    {
        return PublishError::NotShared(message);
    }
    if status == 401 || code == "unauthorized" {
        return PublishError::Unauthorized(message);
    }
    PublishError::Rejected { status, message }
}

#[async_trait]
impl Publisher for NotionPublisher {
    fn name(&self) -> &str {
        "notion"
    }

    async fn publish(&self, title: &str, body: &str) -> Result<PublishOutcome, PublishError> {
        let token = self
            .target
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(PublishError::MissingCredential("NOTION_TOKEN"))?;
        let payload = page_payload(&self.target.parent, title, HEADING, body)?;

        let url = format!("{}/v1/pages", self.base_url.trim_end_matches('/'));
        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &text, &self.target.parent));
        }

        let location = serde_json::from_str::<CreatedPage>(&text)
            .ok()
            .and_then(|p| p.url);
        Ok(PublishOutcome::Published { location })
    }
}
