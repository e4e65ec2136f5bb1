use serde::Serialize;
use std::fmt;

/// Pipeline states. Collect and summarize failures are absorbed; only a
/// publish failure leaves the happy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Start,
    Collect,
    Summarize,
    Publish,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Collect => write!(f, "collect"),
            Self::Summarize => write!(f, "summarize"),
            Self::Publish => write!(f, "publish"),
            Self::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StageOutcome {
    Ok,
    Degraded { reason: String },
}

/// A stage result that always carries a usable value, plus the reason it is
/// second-best when something upstream failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Staged<T> {
    pub value: T,
    pub outcome: StageOutcome,
}

impl<T> Staged<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            outcome: StageOutcome::Ok,
        }
    }

    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            outcome: StageOutcome::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.outcome, StageOutcome::Degraded { .. })
    }

    pub fn into_parts(self) -> (T, StageOutcome) {
        (self.value, self.outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    #[serde(flatten)]
    pub outcome: StageOutcome,
}
