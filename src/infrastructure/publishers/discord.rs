use crate::domain::error::PublishError;
use crate::domain::ports::publisher::{PublishOutcome, Publisher};
use crate::domain::values::publish_target::WebhookTarget;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::warn;

/// Discord rejects `content` longer than this many characters.
pub const CONTENT_LIMIT: usize = 2000;

/// Posts the body as a plain webhook message. The title is not sent; callers
/// put everything that should appear into the body.
pub struct DiscordWebhookPublisher {
    client: Client,
    url: Option<String>,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

impl DiscordWebhookPublisher {
    pub fn new(target: WebhookTarget, client: Client) -> Self {
        Self {
            client,
            url: target.url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Cuts `text` to the content limit on a character boundary, ending with an
/// ellipsis when something was dropped.
pub fn fit_content(text: &str) -> String {
    if text.chars().count() <= CONTENT_LIMIT {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(CONTENT_LIMIT - 1).collect();
    cut.push('…');
    cut
}

#[async_trait]
impl Publisher for DiscordWebhookPublisher {
    fn name(&self) -> &str {
        "discord"
    }

    fn content_limit(&self) -> Option<usize> {
        Some(CONTENT_LIMIT)
    }

    async fn publish(&self, _title: &str, body: &str) -> Result<PublishOutcome, PublishError> {
        let Some(url) = self.url.as_deref() else {
            warn!("DISCORD_WEBHOOK_URL is not set, skipping webhook post");
            return Ok(PublishOutcome::Skipped {
                reason: "DISCORD_WEBHOOK_URL is not set".to_string(),
            });
        };

        let content = fit_content(body);
        let resp = self
            .client
            .post(url)
            .json(&WebhookPayload { content: &content })
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(PublishOutcome::Published { location: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::compose::with_link;

    #[test]
    fn test_payload_shape() {
        let body = "要約です。\n\n**Link:** https://example.com/a";
        let value = serde_json::to_value(WebhookPayload { content: body }).unwrap();
        assert_eq!(value, serde_json::json!({ "content": body }));
    }

    #[test]
    fn test_fit_content() {
        assert_eq!(fit_content("short"), "short");
        let long = "x".repeat(CONTENT_LIMIT + 10);
        let fitted = fit_content(&long);
        assert_eq!(fitted.chars().count(), CONTENT_LIMIT);
        assert!(fitted.ends_with('…'));
    }

    #[test]
    fn test_link_survives_long_summary() {
        let publisher = DiscordWebhookPublisher::new(WebhookTarget { url: None }, Client::new());
        let body = with_link(
            &"あ".repeat(1995),
            "https://news.example.jp/1",
            publisher.content_limit(),
        );
        let content = fit_content(&body);
        assert_eq!(content, body);
        assert!(content.ends_with("\n\n**Link:** https://news.example.jp/1"));
        assert!(content.chars().count() <= CONTENT_LIMIT);
    }

    #[tokio::test]
    async fn test_unset_url_is_skipped() {
        for url in [None, Some("   ".to_string())] {
            let publisher =
                DiscordWebhookPublisher::new(WebhookTarget { url }, Client::new());
            let outcome = publisher.publish("t", "b").await.unwrap();
            assert!(matches!(outcome, PublishOutcome::Skipped { .. }));
        }
    }
}
