use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::COOKIE, Client, Url};
use tracing::{debug, instrument};

use super::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Source of the attendance page. Implemented over HTTP, mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalClient: Send + Sync {
    async fn fetch_attendance_page(&self) -> Result<String, FetchError>;
}

pub struct HttpPortalClient {
    client: Client,
    url: Url,
    cookie: Option<String>,
}

impl HttpPortalClient {
    /// `cookie` is sent verbatim as the `Cookie` header, e.g. `JSESSIONID=abc`.
    pub fn new(url: Url, cookie: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url,
            cookie,
        })
    }
}

#[async_trait]
impl PortalClient for HttpPortalClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_attendance_page(&self) -> Result<String, FetchError> {
        let mut request = self.client.get(self.url.clone());
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
