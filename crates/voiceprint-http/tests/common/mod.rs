//! Shared test helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hound::{SampleFormat, WavSpec, WavWriter};
use voiceprint_core::error::TransportError;
use voiceprint_core::transport::{BlockingTransport, HttpRequest, HttpResponse, Transport};
use voiceprint_core::{ClientConfig, ResolvedConfig};

pub const BASE: &str = "https://api.test/api";

/// One canned transport outcome.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    WithCookies(u16, String, Vec<(String, String)>),
    Timeout,
}

impl Reply {
    pub fn status(status: u16, body: &str) -> Self {
        Reply::Status(status, body.to_string())
    }

    pub fn tokens(token: &str, refresh: &str) -> Self {
        Reply::Status(
            200,
            format!(r#"{{"token":"{}","refresh_token":"{}"}}"#, token, refresh),
        )
    }

    pub fn with_cookie(status: u16, body: &str, name: &str, value: &str) -> Self {
        Reply::WithCookies(
            status,
            body.to_string(),
            vec![(name.to_string(), value.to_string())],
        )
    }

    fn into_result(self) -> Result<HttpResponse, TransportError> {
        match self {
            Reply::Status(status, body) => Ok(HttpResponse::new(status, body)),
            Reply::WithCookies(status, body, cookies) => {
                Ok(HttpResponse::new(status, body).with_cookies(cookies.into_iter().collect()))
            }
            Reply::Timeout => Err(TransportError::Timeout { duration_ms: 10_000 }),
        }
    }
}

/// In-memory transport answering by endpoint path.
///
/// Each path has a queue of replies; the last reply repeats forever.
/// Unscripted paths answer 404.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(self: &Arc<Self>, path: &str, replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), replies.into_iter().collect());
        Arc::clone(self)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn answer(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(BASE)
            .unwrap_or(&request.url)
            .to_string();
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        reply
            .unwrap_or_else(|| Reply::status(404, "Not Found"))
            .into_result()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.answer(request)
    }
}

impl BlockingTransport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.answer(request)
    }
}

pub fn config(auto_refresh: bool) -> ResolvedConfig {
    ClientConfig::new("test-key")
        .base_url(BASE)
        .auto_refresh(auto_refresh)
        .resolve()
        .unwrap()
}

/// Write a stereo, 16-bit, 48 kHz WAV file.
pub fn write_valid_wav(path: &Path) {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48_000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for _ in 0..960 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Write `size` bytes of zeros.
pub fn write_blob(path: &Path, size: usize) {
    std::fs::write(path, vec![0u8; size]).unwrap();
}
