//! Native HTTP transport backed by `reqwest`.
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};

use crate::api::{ApiRequest, Method, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, classify_failure};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a client honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the TLS backend cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Network(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn exchange(&self, request: ApiRequest) -> Result<String, ApiError> {
        let url = self.config.url(&request.path());
        let mut builder = match request.method() {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        }
        .header(ACCEPT, "application/json");
        if let Some(value) = &request.authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        } else if request.method() == Method::Post {
            builder = builder.json(&serde_json::json!({}));
        }

        let response = builder.send().await.map_err(|err| network_error(&err))?;
        let status = response.status();
        let text = response.text().await.map_err(|err| network_error(&err))?;
        if status.is_success() {
            Ok(text)
        } else {
            log::debug!("{url} responded with {status}");
            Err(classify_failure(status.as_u16(), &text))
        }
    }
}

fn network_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network(format!("request timed out: {err}"))
    } else {
        ApiError::Network(err.to_string())
    }
}
