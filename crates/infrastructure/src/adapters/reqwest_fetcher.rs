//! Document download over HTTP using reqwest.

use std::time::Duration;

use meridian_application::ports::{DocumentError, DocumentFetcher};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = concat!("Meridian/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;

/// Fetches documents with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestDocumentFetcher {
    client: Client,
    timeout: Duration,
}

impl ReqwestDocumentFetcher {
    /// Creates a fetcher with a 30 second timeout that follows up to 10
    /// redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, DocumentError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| DocumentError::Network(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Uses an existing client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Accepts absolute `http` and `https` URLs only.
fn parse_document_url(raw: &str) -> Result<Url, DocumentError> {
    let url = Url::parse(raw).map_err(|e| DocumentError::InvalidUrl(format!("{e}: {raw}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DocumentError::InvalidUrl(format!(
            "unsupported scheme {scheme}: {raw}"
        ))),
    }
}

impl DocumentFetcher for ReqwestDocumentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DocumentError> {
        let parsed = parse_document_url(url)?;
        tracing::debug!(%parsed, "fetching document");

        let response = self
            .client
            .get(parsed)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DocumentError::Network(format!("timed out after {:?}", self.timeout))
                } else {
                    DocumentError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| DocumentError::Network(format!("failed to read body: {e}")))
    }
}
