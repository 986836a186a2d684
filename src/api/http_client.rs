use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// The API version header the Web Store expects on all authenticated requests.
pub const API_VERSION_HEADER: &str = "x-goog-api-version";
pub const API_VERSION: &str = "2";

/// Builds the two headers every authenticated request carries.
pub fn auth_headers(token: &str) -> ApiResult<HeaderMap> {
    let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| ApiError::InvalidToken)?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, bearer);
    headers.insert(
        HeaderName::from_static(API_VERSION_HEADER),
        HeaderValue::from_static(API_VERSION),
    );
    Ok(headers)
}

/// Unwraps a response into its JSON body, discarding status and headers.
///
/// We (naively) treat any non-2xx status as a transport error and don't
/// distinguish further. Everything else must be JSON.
pub async fn extract_body(response: reqwest::Response) -> ApiResult<Value> {
    let response = response.error_for_status()?;
    let response_text = response.text().await?;
    tracing::trace!(body = %response_text, "response body");

    Ok(serde_json::from_str(&response_text)?)
}
