use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Default name of the title column in a freshly created Notion database
/// with a Japanese workspace locale.
pub const DEFAULT_TITLE_FIELD: &str = "名前";

/// Where a structured page is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentContainer {
    /// Multi-entry container; the title must be written to `title_field`.
    Database {
        id: Option<String>,
        title_field: String,
    },
    /// Single page; the new page becomes its child.
    Page { id: Option<String> },
}

impl ParentContainer {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Database { id, .. } | Self::Page { id } => id.as_deref(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct StructuredPageTarget {
    pub parent: ParentContainer,
    pub token: Option<String>,
}

impl fmt::Debug for StructuredPageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredPageTarget")
            .field("parent", &self.parent)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    pub url: Option<String>,
}

impl fmt::Debug for WebhookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Webhook URLs embed their secret.
        f.debug_struct("WebhookTarget")
            .field("url", &self.url.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Publish destination. Credentials stay optional here; a missing one is
/// reported by the publisher when it is actually needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    StructuredPage(StructuredPageTarget),
    Webhook(WebhookTarget),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Notion,
    Discord,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notion => write!(f, "notion"),
            Self::Discord => write!(f, "discord"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notion" => Ok(Self::Notion),
            "discord" | "webhook" => Ok(Self::Discord),
            _ => Err(format!(
                "Invalid target: '{s}'. Use 'notion' or 'discord'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let target = PublishTarget::StructuredPage(StructuredPageTarget {
            parent: ParentContainer::Page {
                id: Some("abc".into()),
            },
            token: Some("secret_123".into()),
        });
        let dbg = format!("{target:?}");
        assert!(!dbg.contains("secret_123"));
        assert!(dbg.contains("abc"));

        let hook = WebhookTarget {
            url: Some("https://discord.com/api/webhooks/1/token".into()),
        };
        assert!(!format!("{hook:?}").contains("token"));
    }

    #[test]
    fn test_target_kind_parse() {
        assert_eq!("Discord".parse::<TargetKind>().unwrap(), TargetKind::Discord);
        assert_eq!("webhook".parse::<TargetKind>().unwrap(), TargetKind::Discord);
        assert!("slack".parse::<TargetKind>().is_err());
    }
}
