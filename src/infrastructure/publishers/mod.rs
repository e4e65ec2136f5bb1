pub mod discord;
pub mod notion;

use crate::domain::ports::publisher::Publisher;
use crate::domain::values::publish_target::PublishTarget;
use discord::DiscordWebhookPublisher;
use notion::NotionPublisher;
use reqwest::Client;
use std::sync::Arc;

/// Picks the publisher variant for a target. `notion_base_url` only matters
/// for structured pages.
pub fn for_target(
    target: PublishTarget,
    notion_base_url: Option<String>,
    client: Client,
) -> Arc<dyn Publisher> {
    match target {
        PublishTarget::StructuredPage(page) => {
            Arc::new(NotionPublisher::new(page, notion_base_url, client))
        }
        PublishTarget::Webhook(hook) => Arc::new(DiscordWebhookPublisher::new(hook, client)),
    }
}
