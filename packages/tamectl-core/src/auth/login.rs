use crate::auth::Credentials;
use crate::cloud::{self, CloudEndpointConfig, Session};
use crate::error::{CloudError, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{StatusCode, Url};
use std::sync::Arc;

const AUTHENTICATE_PATH: &str = "/authenticate";

/// Log in and return a session carrying the issued cookie.
///
/// One POST, no retries. A 401 means the email or password was rejected;
/// any status other than 200 is reported with its raw body.
pub async fn authenticate(
    endpoint: &CloudEndpointConfig,
    credentials: &Credentials,
) -> Result<Session> {
    let api_url = Url::parse(&endpoint.api_url).map_err(|e| {
        CloudError::invalid_input(format!("invalid API URL '{}': {}", endpoint.api_url, e))
    })?;

    let jar = Arc::new(Jar::default());
    let client = reqwest::Client::builder()
        .cookie_provider(Arc::clone(&jar))
        .build()?;

    let url = endpoint.endpoint(AUTHENTICATE_PATH);
    tracing::debug!("Authenticating {} against {}", credentials.email, url);

    let resp = client
        .post(&url)
        .json(&credentials.login_request())
        .send()
        .await?;
    let (status, body) = cloud::drain(resp).await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(CloudError::AuthenticationFailed);
    }
    if status != StatusCode::OK {
        return Err(cloud::unexpected_response(&url, status, body));
    }

    if jar.cookies(&api_url).is_none() {
        tracing::warn!("Login succeeded but no session cookie was issued for {}", api_url);
    }

    tracing::info!("Authenticated as {}", credentials.email);
    Ok(Session::new(client, endpoint.clone()))
}
