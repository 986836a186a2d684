use reqwest::{Method, Url};
use serde_json::Value;

use super::http_client::{auth_headers, extract_body};
use super::package::Package;
use crate::config::{ClientConfig, Credentials};
use crate::error::{ApiError, ApiResult, ConfigError};
use crate::oauth;

/// The release channel used when `publish` isn't given one.
pub const DEFAULT_PUBLISH_TARGET: &str = "default";

/// The release channel limited to the item's trusted testers.
pub const TRUSTED_TESTERS_PUBLISH_TARGET: &str = "trustedTesters";

/// A client for the Chrome Web Store publishing API.
///
/// Nothing here changes after construction, so a single client
/// (or any of its clones) may be used from several tasks at once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    credentials: Credentials,
    /// The item that `upload_existing` and `publish` operate on.
    extension_id: Option<String>,
    api_root: Url,
    token_url: Url,
}

impl ApiClient {
    /// Creates a new API client, validating the given configuration.
    /// No requests are made until an operation is called.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let credentials =
            Credentials::new(config.client_id, config.client_secret, config.refresh_token)?;

        Ok(Self {
            http: reqwest::Client::new(),
            credentials,
            extension_id: config.extension_id.filter(|id| !id.is_empty()),
            api_root: config.endpoints.api_root_url()?,
            token_url: config.endpoints.token_url()?,
        })
    }

    /// Swaps out the underlying HTTP client.
    /// Timeouts, proxies and the like should be configured on it.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn extension_id(&self) -> Option<&str> {
        self.extension_id.as_deref()
    }

    /// Obtains a fresh access token via our refresh token.
    pub async fn fetch_token(&self) -> ApiResult<String> {
        oauth::refresh_access_token(&self.http, self.token_url.clone(), &self.credentials).await
    }

    /// Uploads a package as a brand new item.
    ///
    /// If `token` is `None`, one is fetched first.
    pub async fn upload_new(
        &self,
        package: Option<Package>,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        let package = package.ok_or(ApiError::MissingPackage)?;
        let url = self.endpoint(&["upload", "chromewebstore", "v1.1", "items"])?;

        let token = self.resolve_token(token).await?;
        self.send(Method::POST, url, &token, Some(package)).await
    }

    /// Uploads a package replacing the contents of our existing item.
    pub async fn upload_existing(
        &self,
        package: Option<Package>,
        token: Option<&str>,
    ) -> ApiResult<Value> {
        let package = package.ok_or(ApiError::MissingPackage)?;
        let extension_id = self.require_extension_id("uploadExisting")?;
        let url = self.endpoint(&["upload", "chromewebstore", "v1.1", "items", extension_id])?;

        let token = self.resolve_token(token).await?;
        self.send(Method::PUT, url, &token, Some(package)).await
    }

    /// Publishes our existing item to `target`, or [`DEFAULT_PUBLISH_TARGET`] if not given.
    pub async fn publish(&self, target: Option<&str>, token: Option<&str>) -> ApiResult<Value> {
        let extension_id = self.require_extension_id("publish")?;
        let mut url =
            self.endpoint(&["chromewebstore", "v1.1", "items", extension_id, "publish"])?;
        url.query_pairs_mut()
            .append_pair("publishTarget", target.unwrap_or(DEFAULT_PUBLISH_TARGET));

        let token = self.resolve_token(token).await?;
        self.send(Method::POST, url, &token, None).await
    }

    /// Uses the caller's token if they gave us a usable one, and fetches one otherwise.
    async fn resolve_token(&self, token: Option<&str>) -> ApiResult<String> {
        match token.filter(|token| !token.is_empty()) {
            Some(token) => Ok(token.to_string()),
            None => self.fetch_token().await,
        }
    }

    fn require_extension_id(&self, operation: &'static str) -> Result<&str, ConfigError> {
        self.extension_id
            .as_deref()
            .ok_or(ConfigError::MissingExtensionId { operation })
    }

    /// Appends `segments` to the API root. Each segment is percent-encoded on its own,
    /// so an extension ID can never escape its place within the path.
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidEndpoint {
                endpoint: self.api_root.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        token: &str,
        package: Option<Package>,
    ) -> ApiResult<Value> {
        tracing::debug!(%method, %url, "sending Web Store request");

        let mut request = self.http.request(method, url).headers(auth_headers(token)?);
        if let Some(package) = package {
            request = request.body(package.into_body());
        }

        let result = request.send().await?;
        extract_body(result).await
    }
}
