use crate::domain::error::PublishError;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PublishOutcome {
    /// `location` is the created page URL when the destination returns one.
    Published { location: Option<String> },
    /// Destination intentionally not contacted (e.g. webhook not configured).
    Skipped { reason: String },
}

/// A publish destination. Implementations must not swallow failures.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn name(&self) -> &str;

    /// Longest body the destination accepts, in characters.
    fn content_limit(&self) -> Option<usize> {
        None
    }

    async fn publish(&self, title: &str, body: &str) -> Result<PublishOutcome, PublishError>;
}
