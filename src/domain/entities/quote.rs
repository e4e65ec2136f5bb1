use crate::domain::values::lookback::Lookback;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A statically configured instrument: chart symbol plus the label shown in
/// the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub symbol: String,
    pub label: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
        }
    }

    /// Nikkei 225 and USD/JPY.
    pub fn default_set() -> Vec<Instrument> {
        vec![
            Instrument::new("^N225", "日経平均"),
            Instrument::new("JPY=X", "USD/JPY"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuotePrice {
    Close {
        value: f64,
        as_of: Option<NaiveDate>,
    },
    /// `reason` is `None` when the source answered but had no rows.
    Unavailable { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub label: String,
    pub symbol: String,
    pub price: QuotePrice,
    pub period: Lookback,
}

impl Quote {
    pub fn close(
        instrument: &Instrument,
        value: f64,
        as_of: Option<NaiveDate>,
        period: Lookback,
    ) -> Self {
        Self {
            label: instrument.label.clone(),
            symbol: instrument.symbol.clone(),
            price: QuotePrice::Close { value, as_of },
            period,
        }
    }

    pub fn unavailable(instrument: &Instrument, reason: Option<String>, period: Lookback) -> Self {
        Self {
            label: instrument.label.clone(),
            symbol: instrument.symbol.clone(),
            price: QuotePrice::Unavailable { reason },
            period,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.price, QuotePrice::Close { .. })
    }

    pub fn close_value(&self) -> Option<f64> {
        match self.price {
            QuotePrice::Close { value, .. } => Some(value),
            QuotePrice::Unavailable { .. } => None,
        }
    }
}

/// One document line per quote.
impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.price {
            QuotePrice::Close { value, .. } => write!(f, "{}: {:.2}", self.label, value),
            QuotePrice::Unavailable { reason: None } => {
                write!(f, "{}: データ取得不可（データなし）", self.label)
            }
            QuotePrice::Unavailable {
                reason: Some(reason),
            } => write!(f, "{}: 取得エラー ({reason})", self.label),
        }
    }
}
