use serde::Serialize;
use std::fmt;

/// Trailing window a closing price is searched in. Weekends and holidays
/// leave short windows empty, so the quote source may widen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookback {
    OneDay,
    FiveDays,
    OneMonth,
}

impl Lookback {
    /// Range parameter understood by the chart API.
    pub fn as_range(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
        }
    }

    /// Default widening sequence: five trading days, then a month.
    pub fn default_windows() -> Vec<Lookback> {
        vec![Self::FiveDays, Self::OneMonth]
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_range())
    }
}
