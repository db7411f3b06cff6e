use std::io::Read;

use reqwest::header::CONTENT_LENGTH;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// An opened content transfer. The body is closed when this is dropped.
pub struct TransferBody {
    pub status: u16,
    /// Declared size from `Content-Length`, if the server sent one
    pub content_length: Option<u64>,
    pub reader: Box<dyn Read + Send>,
}

impl TransferBody {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Network side of the client: metadata fetches and content transfers.
pub trait Transport {
    /// Fetches `url` and returns its body as text. Non-success statuses are errors.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Starts a transfer of `url`. The status is left for the caller to judge.
    fn open(&self, url: &str) -> Result<TransferBody>;
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        // The blocking client defaults to a 30s timeout, too short for large downloads.
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching metadata");
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::http_status(status.as_u16(), url));
        }
        Ok(resp.text()?)
    }

    fn open(&self, url: &str) -> Result<TransferBody> {
        debug!(url, "opening transfer");
        let resp = self.client.get(url).send()?;

        // Missing or malformed length means unknown.
        let content_length = resp
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(TransferBody {
            status: resp.status().as_u16(),
            content_length,
            reader: Box::new(resp),
        })
    }
}
