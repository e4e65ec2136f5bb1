use crate::domain::entities::quote::{Instrument, Quote};
use crate::domain::ports::quote_provider::QuoteProvider;
use crate::domain::values::lookback::Lookback;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetches one quote per instrument. Never fails: a broken instrument turns
/// into an unavailable quote and the loop moves on.
pub struct CollectQuotesUseCase {
    provider: Arc<dyn QuoteProvider>,
    instruments: Vec<Instrument>,
    windows: Vec<Lookback>,
}

impl CollectQuotesUseCase {
    pub fn new(
        provider: Arc<dyn QuoteProvider>,
        instruments: Vec<Instrument>,
        windows: Vec<Lookback>,
    ) -> Self {
        let windows = if windows.is_empty() {
            Lookback::default_windows()
        } else {
            windows
        };
        Self {
            provider,
            instruments,
            windows,
        }
    }

    pub async fn execute(&self) -> Vec<Quote> {
        let mut quotes = Vec::with_capacity(self.instruments.len());
        for instrument in &self.instruments {
            quotes.push(self.fetch_one(instrument).await);
        }

        let available = quotes.iter().filter(|q| q.is_available()).count();
        info!(
            provider = self.provider.name(),
            available,
            total = quotes.len(),
            "quotes collected"
        );
        quotes
    }

    async fn fetch_one(&self, instrument: &Instrument) -> Quote {
        // Only an empty window widens; an error ends the attempt.
        let mut last_window = self.windows[0];
        for &window in &self.windows {
            last_window = window;
            match self.provider.latest_close(&instrument.symbol, window).await {
                Ok(Some(close)) => {
                    debug!(symbol = %instrument.symbol, %window, close = close.value, "close found");
                    return Quote::close(instrument, close.value, close.as_of, window);
                }
                Ok(None) => {
                    debug!(symbol = %instrument.symbol, %window, "no closes in window");
                }
                Err(e) => {
                    warn!(symbol = %instrument.symbol, %window, error = %e, "quote fetch failed");
                    return Quote::unavailable(instrument, Some(e.to_string()), window);
                }
            }
        }
        warn!(symbol = %instrument.symbol, "no closes in any lookback window");
        Quote::unavailable(instrument, None, last_window)
    }
}
