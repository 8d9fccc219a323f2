use arthneeti_client::{ApiError, ApiRequest, ClientConfig, Method, Transport, classify_failure};
use async_trait::async_trait;

use crate::dom;

/// [`Transport`] over the browser `fetch` API.
#[derive(Debug, Clone)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

/// Body sent with a request. `POST` always carries a JSON object.
fn request_body(request: &ApiRequest) -> Option<String> {
    match (&request.body, request.method()) {
        (Some(body), _) => Some(body.to_string()),
        (None, Method::Post) => Some("{}".to_string()),
        (None, Method::Get) => None,
    }
}

fn request_headers<'a>(request: &'a ApiRequest, has_body: bool) -> Vec<(&'static str, &'a str)> {
    let mut headers = vec![("Accept", "application/json")];
    if has_body {
        headers.push(("Content-Type", "application/json"));
    }
    if let Some(value) = &request.authorization {
        headers.push(("Authorization", value.as_str()));
    }
    headers
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn exchange(&self, request: ApiRequest) -> Result<String, ApiError> {
        let url = self.config.url(&request.path());
        let body = request_body(&request);
        let headers = request_headers(&request, body.is_some());
        let reply = dom::fetch_text(request.method().as_str(), &url, &headers, body.as_deref())
            .await
            .map_err(|err| ApiError::Network(dom::js_error_message(&err)))?;
        if reply.is_success() {
            Ok(reply.body)
        } else {
            log::debug!("{url} responded with {}", reply.status);
            Err(classify_failure(reply.status, &reply.body))
        }
    }
}
