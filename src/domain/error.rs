use thiserror::Error;

/// Top-level error returned by the facade. Only configuration problems and
/// publish failures ever reach this type; source and generation failures are
/// absorbed into the document and summary text.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),
}

/// Failure of an upstream data source (quotes or feed).
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Failure of the text-generation backend.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure of a publish destination. Unlike the other error kinds this one
/// terminates the run.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    #[error("missing {0}")]
    MissingCredential(&'static str),

    #[error("title field '{field}' does not exist on the destination database")]
    TitleFieldMismatch { field: String },

    #[error("destination is not shared with the integration: {0}")]
    NotShared(String),

    #[error("destination rejected the token: {0}")]
    Unauthorized(String),

    #[error("destination returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),
}

impl PublishError {
    /// Remediation hint shown to the operator before the error propagates.
    pub fn hint(&self) -> Option<String> {
        match self {
            PublishError::MissingCredential(what) => Some(format!(
                "Set {what} in the environment (or .env) before running."
            )),
            PublishError::TitleFieldMismatch { field } => Some(format!(
                "The database title column may not be named '{field}'. Check the column name in Notion and set NOTION_TITLE_FIELD to match."
            )),
            PublishError::NotShared(_) => Some(
                "The integration has no access to the parent. Open the database/page menu in Notion and add the integration under Connections."
                    .to_string(),
            ),
            PublishError::Unauthorized(_) => {
                Some("Check that NOTION_TOKEN is a valid internal integration secret.".to_string())
            }
            PublishError::Rejected { .. } | PublishError::Transport(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_field_hint_names_field() {
        let err = PublishError::TitleFieldMismatch {
            field: "Name".into(),
        };
        let hint = err.hint().unwrap();
        assert!(hint.contains("'Name'"));
        assert!(hint.contains("NOTION_TITLE_FIELD"));
    }

    #[test]
    fn test_transport_has_no_hint() {
        let err = PublishError::Transport("timed out".into());
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_domain_error_wraps_publish() {
        let err: DomainError = PublishError::MissingCredential("NOTION_TOKEN").into();
        assert_eq!(err.to_string(), "Publish failed: missing NOTION_TOKEN");
    }
}
