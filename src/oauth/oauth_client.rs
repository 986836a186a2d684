use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::api::http_client;
use crate::config::Credentials;
use crate::error::{ApiError, ApiResult};

/// The body POSTed to the token endpoint.
#[derive(Serialize, Debug)]
struct RefreshRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    refresh_token: &'a str,
    grant_type: &'static str,
}

/// Exchanges our refresh token for a short-lived access token.
/// Nothing is cached: every call is a fresh round trip.
pub async fn refresh_access_token(
    client: &reqwest::Client,
    token_url: Url,
    credentials: &Credentials,
) -> ApiResult<String> {
    tracing::debug!(
        url = %token_url,
        client_id = credentials.client_id(),
        "refreshing access token"
    );

    let result = client
        .post(token_url)
        .json(&RefreshRequest {
            client_id: credentials.client_id(),
            client_secret: credentials.client_secret(),
            refresh_token: credentials.refresh_token(),
            grant_type: "refresh_token",
        })
        .send()
        .await?;

    let body = http_client::extract_body(result).await?;
    access_token_from(body)
}

/// We only care about `access_token`; `expires_in`, `scope` and friends are ignored.
fn access_token_from(body: Value) -> ApiResult<String> {
    match body.get("access_token") {
        Some(Value::String(access_token)) => Ok(access_token.clone()),
        _ => Err(ApiError::MissingAccessToken),
    }
}
