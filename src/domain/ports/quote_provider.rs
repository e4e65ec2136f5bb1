use crate::domain::error::SourceError;
use crate::domain::values::lookback::Lookback;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Most recent close found inside a lookback window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosingPrice {
    pub value: f64,
    pub as_of: Option<NaiveDate>,
}

/// End-of-day price backend (Yahoo chart API in production).
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the backend answered but the window held no closes;
    /// the caller may retry with a wider window.
    async fn latest_close(
        &self,
        symbol: &str,
        window: Lookback,
    ) -> Result<Option<ClosingPrice>, SourceError>;
}
