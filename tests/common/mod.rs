#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::{self, Cursor, Read},
    sync::Mutex,
};

use tubegrab::{Client, ClientConfig, Error, Result, TransferBody, Transport};

pub const META_PREFIX: &str = "http://meta.test/info?video_id=";

/// Canned content served by [`FakeTransport::open`].
#[derive(Clone)]
pub struct FakeTransfer {
    pub status: u16,
    pub content_length: Option<u64>,
    pub data: Vec<u8>,
    /// Maximum bytes per read
    pub chunk: usize,
    /// Fail with a connection reset once `data` is exhausted
    pub fail_at_end: bool,
}

impl FakeTransfer {
    pub fn ok(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            status: 200,
            content_length: Some(data.len() as u64),
            data,
            chunk,
            fail_at_end: false,
        }
    }
}

/// In-memory [`Transport`] that records the URLs it was asked for.
#[derive(Default)]
pub struct FakeTransport {
    pub meta: HashMap<String, String>,
    pub transfers: HashMap<String, FakeTransfer>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn with_meta(mut self, video_id: &str, body: &str) -> Self {
        self.meta
            .insert(format!("{META_PREFIX}{video_id}"), body.to_string());
        self
    }

    pub fn with_transfer(mut self, url: &str, transfer: FakeTransfer) -> Self {
        self.transfers.insert(url.to_string(), transfer);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }
}

impl Transport for FakeTransport {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.record(url);
        self.meta
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http_status(404, url))
    }

    fn open(&self, url: &str) -> Result<TransferBody> {
        self.record(url);
        let transfer = self
            .transfers
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http_status(404, url))?;
        Ok(TransferBody {
            status: transfer.status,
            content_length: transfer.content_length,
            reader: Box::new(ChunkedReader {
                data: Cursor::new(transfer.data),
                chunk: transfer.chunk,
                fail_at_end: transfer.fail_at_end,
            }),
        })
    }
}

struct ChunkedReader {
    data: Cursor<Vec<u8>>,
    chunk: usize,
    fail_at_end: bool,
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(self.chunk);
        let n = self.data.read(&mut buf[..limit])?;
        if n == 0 && self.fail_at_end {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        Ok(n)
    }
}

pub fn client(transport: FakeTransport) -> Client<FakeTransport> {
    let config = ClientConfig {
        meta_url: META_PREFIX.to_string(),
        ..ClientConfig::default()
    };
    Client::with_transport(config, transport)
}
