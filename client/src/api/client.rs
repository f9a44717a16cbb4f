use reqwest::{Client, Method, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::types::{ApiError, ErrorBody},
    config::AppConfig,
};

/// Single-shot JSON client for the student API. No retries: every failure goes
/// straight back to the caller.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::NetworkUnavailable(format!("Failed to build client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T>(&self, path: &str, token: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.send_json::<(), T>(Method::GET, path, None, token).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, Some(body), token).await
    }

    /// Issues one request and classifies the outcome.
    ///
    /// `Content-Type: application/json` is set only when a body is given and
    /// `Authorization: Bearer` only when a token is given.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "sending request");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::NetworkUnavailable(format!("Request failed: {}", e)))?;

        Self::parse_response(response).await
    }

    async fn parse_response<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkUnavailable(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            serde_json::from_str(&text)
                .map_err(|e| ApiError::MalformedResponse(format!("Failed to parse response: {}", e)))
        } else {
            Err(ApiError::ServerRejected {
                status: status.as_u16(),
                message: error_message(status.as_u16(), &text),
            })
        }
    }
}

/// The server's `message` when the body is a JSON error, otherwise the raw text.
fn error_message(status: u16, text: &str) -> String {
    if let Ok(ErrorBody {
        message: Some(message),
    }) = serde_json::from_str::<ErrorBody>(text)
    {
        if !message.trim().is_empty() {
            return message;
        }
    }
    let raw = text.trim();
    if raw.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        raw.to_string()
    }
}
