use crate::domain::error::PublishError;
use crate::domain::ports::publisher::{PublishOutcome, Publisher};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct PublishUseCase {
    publisher: Arc<dyn Publisher>,
}

impl PublishUseCase {
    pub fn new(publisher: Arc<dyn Publisher>) -> Self {
        Self { publisher }
    }

    pub fn destination(&self) -> &str {
        self.publisher.name()
    }

    pub fn content_limit(&self) -> Option<usize> {
        self.publisher.content_limit()
    }

    /// Publishes and logs the outcome. Errors are logged with their hint and
    /// returned unchanged.
    pub async fn execute(&self, title: &str, body: &str) -> Result<PublishOutcome, PublishError> {
        info!(destination = self.publisher.name(), %title, "publishing");
        match self.publisher.publish(title, body).await {
            Ok(outcome) => {
                match &outcome {
                    PublishOutcome::Published { location } => info!(
                        destination = self.publisher.name(),
                        location = location.as_deref().unwrap_or("-"),
                        "published successfully"
                    ),
                    PublishOutcome::Skipped { reason } => {
                        warn!(destination = self.publisher.name(), %reason, "publish skipped")
                    }
                }
                Ok(outcome)
            }
            Err(e) => {
                error!(destination = self.publisher.name(), error = %e, "publish failed");
                if let Some(hint) = e.hint() {
                    error!("hint: {hint}");
                }
                Err(e)
            }
        }
    }
}
