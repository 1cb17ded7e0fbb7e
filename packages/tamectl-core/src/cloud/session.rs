use crate::cloud::CloudEndpointConfig;
use crate::error::{CloudError, Result};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An authenticated HTTP context.
///
/// The cookie issued at login lives in the client's cookie jar and is sent
/// with every request made through the session. Sessions are created by
/// [`crate::auth::authenticate`] and never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    endpoint: CloudEndpointConfig,
}

impl Session {
    pub(crate) fn new(client: reqwest::Client, endpoint: CloudEndpointConfig) -> Self {
        Self { client, endpoint }
    }

    /// The API base URL this session talks to.
    pub fn api_url(&self) -> &str {
        &self.endpoint.api_url
    }

    /// GET an API path and return the body of a successful response.
    pub(crate) async fn get_text(&self, path: &str) -> Result<(String, String)> {
        let url = self.endpoint.endpoint(path);
        tracing::debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        let (status, body) = drain(resp).await?;
        let body = expect_success(&url, status, body)?;
        Ok((url, body))
    }

    /// POST a JSON body to an API path and return the body of a successful
    /// response.
    pub(crate) async fn post_json<T>(&self, path: &str, payload: &T) -> Result<(String, String)>
    where
        T: Serialize + ?Sized,
    {
        let url = self.endpoint.endpoint(path);
        tracing::debug!("POST {}", url);

        let resp = self.client.post(&url).json(payload).send().await?;
        let (status, body) = drain(resp).await?;
        let body = expect_success(&url, status, body)?;
        Ok((url, body))
    }
}

/// Read the whole response body before anything inspects it, so error paths
/// see the complete payload.
pub(crate) async fn drain(resp: Response) -> Result<(StatusCode, String)> {
    let status = resp.status();
    let body = resp.text().await?;
    Ok((status, body))
}

fn expect_success(url: &str, status: StatusCode, body: String) -> Result<String> {
    if status == StatusCode::OK {
        Ok(body)
    } else {
        Err(unexpected_response(url, status, body))
    }
}

pub(crate) fn unexpected_response(url: &str, status: StatusCode, body: String) -> CloudError {
    tracing::error!("Unexpected response from {}: {} - {}", url, status, body);
    CloudError::UnexpectedResponse {
        endpoint: url.to_string(),
        status,
        body,
    }
}

pub(crate) fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| CloudError::Decode {
        endpoint: url.to_string(),
        source,
    })
}
