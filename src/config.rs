//! Process configuration, read once at startup.
//!
//! Nothing else in the crate looks at the environment: `main` builds an
//! [`AppConfig`] and hands the pieces to each component. Credentials are
//! optional here so a missing one only affects the stage that needs it.

use crate::application::pipeline::PipelineSettings;
use crate::domain::error::DomainError;
use crate::domain::values::prompt::{PromptSlots, PromptTemplate};
use crate::domain::values::publish_target::{
    ParentContainer, PublishTarget, StructuredPageTarget, TargetKind, WebhookTarget,
    DEFAULT_TITLE_FIELD,
};
use crate::infrastructure::http::HttpSettings;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A credential whose value never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpenAiSettings {
    pub api_key: Option<Secret>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotionParentKind {
    #[default]
    Database,
    Page,
}

impl FromStr for NotionParentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "database" | "db" => Ok(Self::Database),
            "page" => Ok(Self::Page),
            _ => Err(format!(
                "Invalid Notion parent kind: '{s}'. Use 'database' or 'page'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotionSettings {
    pub token: Option<Secret>,
    pub parent_id: Option<String>,
    pub parent_kind: NotionParentKind,
    pub title_field: String,
    pub base_url: Option<String>,
}

impl Default for NotionSettings {
    fn default() -> Self {
        Self {
            token: None,
            parent_id: None,
            parent_kind: NotionParentKind::Database,
            title_field: DEFAULT_TITLE_FIELD.to_string(),
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub pipeline: PipelineSettings,
    pub http: HttpSettings,
    pub openai: OpenAiSettings,
    pub notion: NotionSettings,
    pub discord_webhook_url: Option<Secret>,
    pub default_target: TargetKind,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut pipeline = PipelineSettings::default();
        if let Some(url) = get("MARKETBRIEF_FEED_URL") {
            pipeline.feed_url = url;
        }
        if let Some(limit) = get("MARKETBRIEF_HEADLINE_LIMIT") {
            pipeline.headline_limit = parse_number("MARKETBRIEF_HEADLINE_LIMIT", &limit)?;
        }
        if let Some(label) = get("MARKETBRIEF_TITLE_LABEL") {
            pipeline.title_label = label;
        }

        let defaults = PromptSlots::default();
        let slots = PromptSlots {
            tone: get("MARKETBRIEF_PROMPT_TONE").unwrap_or(defaults.tone),
            length: get("MARKETBRIEF_PROMPT_LENGTH").unwrap_or(defaults.length),
            audience: get("MARKETBRIEF_PROMPT_AUDIENCE").unwrap_or(defaults.audience),
            formatting: get("MARKETBRIEF_PROMPT_FORMATTING").unwrap_or(defaults.formatting),
        };
        pipeline.digest_prompt = load_template(
            get("MARKETBRIEF_DIGEST_PROMPT_FILE"),
            PromptTemplate::digest(),
            &slots,
        )?;
        pipeline.article_prompt = load_template(
            get("MARKETBRIEF_ARTICLE_PROMPT_FILE"),
            PromptTemplate::article(),
            &slots,
        )?;

        let mut http = HttpSettings::default();
        if let Some(secs) = get("MARKETBRIEF_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_number("MARKETBRIEF_HTTP_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(DomainError::Config(
                    "MARKETBRIEF_HTTP_TIMEOUT_SECS must be greater than 0".to_string(),
                ));
            }
            http.timeout = Duration::from_secs(secs);
        }

        let openai = OpenAiSettings {
            api_key: get("OPENAI_API_KEY").map(Secret::new),
            model: get("OPENAI_MODEL"),
            base_url: get("OPENAI_BASE_URL"),
        };

        let parent_kind = match get("NOTION_PARENT_KIND") {
            Some(kind) => kind.parse().map_err(DomainError::Config)?,
            None => NotionParentKind::Database,
        };
        let notion = NotionSettings {
            token: get("NOTION_TOKEN").map(Secret::new),
            parent_id: get("NOTION_PAGE_ID"),
            parent_kind,
            title_field: get("NOTION_TITLE_FIELD").unwrap_or_else(|| DEFAULT_TITLE_FIELD.to_string()),
            base_url: get("NOTION_BASE_URL"),
        };

        let default_target = match get("MARKETBRIEF_TARGET") {
            Some(target) => target.parse().map_err(DomainError::Config)?,
            None => TargetKind::Notion,
        };

        Ok(Self {
            pipeline,
            http,
            openai,
            notion,
            discord_webhook_url: get("DISCORD_WEBHOOK_URL").map(Secret::new),
            default_target,
        })
    }

    /// Destination descriptor for `kind`, carrying whatever credentials are
    /// configured.
    pub fn publish_target(&self, kind: TargetKind) -> PublishTarget {
        match kind {
            TargetKind::Notion => {
                let id = self.notion.parent_id.clone();
                let parent = match self.notion.parent_kind {
                    NotionParentKind::Database => ParentContainer::Database {
                        id,
                        title_field: self.notion.title_field.clone(),
                    },
                    NotionParentKind::Page => ParentContainer::Page { id },
                };
                PublishTarget::StructuredPage(StructuredPageTarget {
                    parent,
                    token: self.notion.token.as_ref().map(|t| t.expose().to_string()),
                })
            }
            TargetKind::Discord => PublishTarget::Webhook(WebhookTarget {
                url: self
                    .discord_webhook_url
                    .as_ref()
                    .map(|u| u.expose().to_string()),
            }),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::Config(format!("{key} must be a non-negative integer, got '{raw}'")))
}

fn load_template(
    path: Option<String>,
    builtin: PromptTemplate,
    slots: &PromptSlots,
) -> Result<PromptTemplate, DomainError> {
    match path {
        None => Ok(builtin.with_slots(slots.clone())),
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| DomainError::Config(format!("cannot read prompt file {path}: {e}")))?;
            PromptTemplate::new(text, slots.clone())
                .map_err(|e| DomainError::Config(format!("{path}: {e}")))
        }
    }
}
