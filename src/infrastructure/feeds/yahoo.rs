use crate::domain::error::SourceError;
use crate::domain::ports::quote_provider::{ClosingPrice, QuoteProvider};
use crate::domain::values::lookback::Lookback;
use crate::infrastructure::http::BROWSER_USER_AGENT;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::USER_AGENT;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Daily closes from the Yahoo Finance v8 chart API (no auth required).
pub struct YahooChartProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, serde::Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Picks the last non-null close from a chart response body. `Ok(None)`
/// when the window has no rows.
pub fn parse_latest_close(body: &str) -> Result<Option<ClosingPrice>, SourceError> {
    let data: ChartResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))?;

    if let Some(err) = data.chart.error {
        let code = err.code.unwrap_or_else(|| "unknown".into());
        let description = err.description.unwrap_or_default();
        return Err(SourceError::Parse(format!("Yahoo error {code}: {description}")));
    }

    let results = data
        .chart
        .result
        .ok_or_else(|| SourceError::Parse("No chart results".into()))?;
    let Some(chart) = results.into_iter().next() else {
        return Ok(None);
    };

    let offset = chart.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let closes = chart
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .map(|q| q.close)
        .unwrap_or_default();

    let latest = closes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(idx, close)| close.filter(|v| v.is_finite()).map(|v| (idx, v)));

    Ok(latest.map(|(idx, value)| ClosingPrice {
        value,
        as_of: chart
            .timestamp
            .get(idx)
            .and_then(|ts| DateTime::from_timestamp(ts + offset, 0))
            .map(|dt| dt.date_naive()),
    }))
}

#[async_trait]
impl QuoteProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn latest_close(
        &self,
        symbol: &str,
        window: Lookback,
    ) -> Result<Option<ClosingPrice>, SourceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&[("range", window.as_range()), ("interval", "1d")])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Yahoo API returned {} for {symbol}",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        parse_latest_close(&body)
    }
}
