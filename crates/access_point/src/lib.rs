use anyhow::Result;
use async_trait::async_trait;

/// Endpoint of the eFax Developer web service.
pub const EFAX_URL: &str = "https://secure.efaxdeveloper.com/EFax_WebFax.serv";

/// Content type sent with every request. The body is form encoded, but this
/// is the header the service has always been sent.
pub const CONTENT_TYPE: &str = "text/xml";

/// Raw answer to a POST, whatever its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Sends a framed request body to the service.
///
/// Implementations return `Err` only when no HTTP answer was obtained; any
/// status code, including errors, comes back as an [`HttpReply`].
#[async_trait]
pub trait FaxTransport: Send + Sync {
    async fn post(&self, url: &str, body: String) -> Result<HttpReply>;
}

pub mod client;
pub mod http;
pub mod mock;

pub use client::EFaxClient;
pub use http::ReqwestTransport;
pub use mock::MockTransport;
