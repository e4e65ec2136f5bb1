//! In-process fakes for the four pipeline ports.
#![allow(dead_code)]

use async_trait::async_trait;
use marketbrief::application::pipeline::PipelineSettings;
use marketbrief::domain::entities::feed_entry::FeedEntry;
use marketbrief::domain::entities::quote::Instrument;
use marketbrief::domain::error::{GenerationError, PublishError, SourceError};
use marketbrief::domain::ports::feed_reader::FeedReader;
use marketbrief::domain::ports::publisher::{PublishOutcome, Publisher};
use marketbrief::domain::ports::quote_provider::{ClosingPrice, QuoteProvider};
use marketbrief::domain::ports::text_generator::TextGenerator;
use marketbrief::domain::values::lookback::Lookback;
use marketbrief::MarketBrief;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

type QuoteResponse = Result<Option<ClosingPrice>, SourceError>;

/// Answers from a table keyed by (symbol, window); anything missing is an
/// empty window.
#[derive(Default)]
pub struct FakeQuotes {
    responses: HashMap<(String, Lookback), QuoteResponse>,
    pub calls: Mutex<Vec<(String, Lookback)>>,
}

impl FakeQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(self, symbol: &str, window: Lookback, value: f64) -> Self {
        self.respond(symbol, window, Ok(Some(ClosingPrice { value, as_of: None })))
    }

    pub fn fail(self, symbol: &str, window: Lookback, error: SourceError) -> Self {
        self.respond(symbol, window, Err(error))
    }

    pub fn respond(mut self, symbol: &str, window: Lookback, response: QuoteResponse) -> Self {
        self.responses.insert((symbol.to_string(), window), response);
        self
    }

    pub fn calls(&self) -> Vec<(String, Lookback)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for FakeQuotes {
    fn name(&self) -> &str {
        "fake_quotes"
    }

    async fn latest_close(&self, symbol: &str, window: Lookback) -> QuoteResponse {
        self.calls.lock().unwrap().push((symbol.to_string(), window));
        self.responses
            .get(&(symbol.to_string(), window))
            .cloned()
            .unwrap_or(Ok(None))
    }
}

/// Every symbol fails with a network error.
pub struct DownQuotes;

#[async_trait]
impl QuoteProvider for DownQuotes {
    fn name(&self) -> &str {
        "down"
    }

    async fn latest_close(&self, _symbol: &str, _window: Lookback) -> QuoteResponse {
        Err(SourceError::Network("connection refused".into()))
    }
}

pub struct FakeFeed {
    result: Result<Vec<FeedEntry>, SourceError>,
    pub urls: Mutex<Vec<String>>,
}

impl FakeFeed {
    pub fn with_entries(n: usize) -> Self {
        Self::from_result(Ok(entries(n)))
    }

    pub fn failing(error: SourceError) -> Self {
        Self::from_result(Err(error))
    }

    pub fn from_result(result: Result<Vec<FeedEntry>, SourceError>) -> Self {
        Self {
            result,
            urls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FeedReader for FakeFeed {
    async fn read(&self, url: &str) -> Result<Vec<FeedEntry>, SourceError> {
        self.urls.lock().unwrap().push(url.to_string());
        self.result.clone()
    }
}

pub fn entries(n: usize) -> Vec<FeedEntry> {
    (1..=n)
        .map(|i| {
            FeedEntry::new(
                Some(format!("Headline {i}")),
                Some(format!("https://news.example.jp/{i}")),
                Some(format!("Abstract {i}")),
            )
        })
        .collect()
}

/// Returns a fixed response and records every prompt it receives.
pub struct FakeGenerator {
    response: Result<String, GenerationError>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self::from_result(Ok(text.to_string()))
    }

    pub fn failing(error: GenerationError) -> Self {
        Self::from_result(Err(error))
    }

    fn from_result(response: Result<String, GenerationError>) -> Self {
        Self {
            response,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    fn name(&self) -> &str {
        "fake_llm"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.response.clone()
    }
}

/// Records (title, body) pairs; optionally fails every call.
#[derive(Default)]
pub struct RecordingPublisher {
    error: Option<PublishError>,
    limit: Option<usize>,
    pub published: Mutex<Vec<(String, String)>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: PublishError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    fn name(&self) -> &str {
        "recording"
    }

    fn content_limit(&self) -> Option<usize> {
        self.limit
    }

    async fn publish(&self, title: &str, body: &str) -> Result<PublishOutcome, PublishError> {
        self.published
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(PublishOutcome::Published {
                location: Some("https://www.notion.so/page".into()),
            }),
        }
    }
}

pub fn settings() -> PipelineSettings {
    PipelineSettings {
        instruments: vec![
            Instrument::new("^N225", "日経平均"),
            Instrument::new("JPY=X", "USD/JPY"),
        ],
        feed_url: "https://news.example.jp/rss.xml".into(),
        ..PipelineSettings::default()
    }
}

pub fn brief(
    quotes: Arc<dyn QuoteProvider>,
    feed: Arc<dyn FeedReader>,
    generator: Arc<dyn TextGenerator>,
    publisher: Arc<dyn Publisher>,
) -> MarketBrief {
    MarketBrief::with_providers(settings(), quotes, feed, generator, publisher)
}

/// Accepts one connection on a random local port, answers it with `status`
/// and a JSON `body`, and hands back the raw request text.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
