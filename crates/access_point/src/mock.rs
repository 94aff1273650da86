use super::{FaxTransport, HttpReply};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Transport that answers every request with the same canned reply and
/// remembers what it was sent.
#[derive(Default)]
pub struct MockTransport {
    reply: Option<HttpReply>,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, String)>>,
}

impl MockTransport {
    /// Answer every request with `status` and `body`.
    pub fn replying(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(HttpReply {
                status,
                body: body.into(),
            }),
            ..Self::default()
        })
    }

    /// Fail every request as if the connection could not be made.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URL and body of the most recent request.
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FaxTransport for MockTransport {
    async fn post(&self, url: &str, body: String) -> Result<HttpReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some((url.to_string(), body));
        }
        self.reply
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))
    }
}
