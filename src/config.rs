use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiResult, ConfigError};

/// The root of all Web Store API requests.
pub const DEFAULT_API_ROOT: &str = "https://www.googleapis.com";

/// The endpoint leveraged for exchanging a refresh token for an access token.
pub const DEFAULT_TOKEN_URI: &str = "https://www.googleapis.com/oauth2/v4/token";

/// The configuration a client is created from.
///
/// Its JSON form uses the same camelCase keys as the store's own tooling:
/// ```json
/// {
///     "clientId": "[..].apps.googleusercontent.com",
///     "clientSecret": "[..]",
///     "refreshToken": "1//[..]",
///     "extensionId": "[..]"
/// }
/// ```
///
/// Credentials are optional here so that a missing one can be reported by name
/// when the client is created, rather than as a generic deserialization failure.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Only needed for `upload_existing` and `publish`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_id: Option<String>,
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            refresh_token: Some(refresh_token.into()),
            ..Self::default()
        }
    }

    pub fn extension_id(mut self, extension_id: impl Into<String>) -> Self {
        self.extension_id = Some(extension_id.into());
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Parses a JSON configuration document.
    pub fn from_json(contents: &str) -> ApiResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json(&self) -> ApiResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Where requests are sent.
/// These only need changing when talking to something other than Google directly.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    /// Upload and publish paths are appended to this.
    pub api_root: String,
    /// The full URL of the OAuth2 token endpoint.
    pub token_uri: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        }
    }
}

impl Endpoints {
    /// Uses `root` for every request, keeping the standard paths beneath it.
    pub fn with_root(root: impl Into<String>) -> Self {
        let api_root: String = root.into();
        let token_uri = format!("{}/oauth2/v4/token", api_root.trim_end_matches('/'));
        Self {
            api_root,
            token_uri,
        }
    }

    pub(crate) fn api_root_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.api_root)
    }

    pub(crate) fn token_url(&self) -> Result<Url, ConfigError> {
        parse_base_url(&self.token_uri)
    }
}

fn parse_base_url(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|error| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: error.to_string(),
    })?;

    // Paths get appended to these, so something like `mailto:` is of no use to us.
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

/// The account's OAuth2 credentials, validated at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl Credentials {
    /// Every field must be present and non-empty.
    /// The first missing one is reported, in `clientId`, `clientSecret`, `refreshToken` order.
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: required("clientId", client_id)?,
            client_secret: required("clientSecret", client_secret)?,
            refresh_token: required("refreshToken", refresh_token)?,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

// Secrets stay out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingOption(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_json() {
        let config = ClientConfig::from_json(
            r#"{
                "clientId": "id",
                "clientSecret": "secret",
                "refreshToken": "refresh",
                "extensionId": "abcdefghijklmnop"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config,
            ClientConfig::new("id", "secret", "refresh").extension_id("abcdefghijklmnop")
        );
        assert_eq!(config.endpoints, Endpoints::default());
    }

    #[test]
    fn missing_keys_deserialize_as_none() {
        let config = ClientConfig::from_json(r#"{"clientId": "id"}"#).unwrap();
        assert_eq!(config.client_secret, None);
        assert_eq!(config.extension_id, None);
    }

    #[test]
    fn credentials_report_first_missing_field() {
        let error = Credentials::new(None, None, Some("refresh".into())).unwrap_err();
        assert!(matches!(error, ConfigError::MissingOption("clientId")));

        let error =
            Credentials::new(Some("id".into()), Some(String::new()), None).unwrap_err();
        assert!(matches!(error, ConfigError::MissingOption("clientSecret")));

        let error =
            Credentials::new(Some("id".into()), Some("secret".into()), None).unwrap_err();
        assert!(matches!(error, ConfigError::MissingOption("refreshToken")));
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let credentials = Credentials::new(
            Some("id".into()),
            Some("hunter2".into()),
            Some("1//refresh".into()),
        )
        .unwrap();
        let printed = format!("{credentials:?}");
        assert!(printed.contains("id"));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("1//refresh"));
    }

    #[test]
    fn with_root_derives_token_uri() {
        let endpoints = Endpoints::with_root("http://127.0.0.1:1234/");
        assert_eq!(endpoints.api_root, "http://127.0.0.1:1234/");
        assert_eq!(endpoints.token_uri, "http://127.0.0.1:1234/oauth2/v4/token");
    }

    #[test]
    fn rejects_unusable_endpoints() {
        let endpoints = Endpoints::with_root("not a url");
        assert!(matches!(
            endpoints.api_root_url(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));

        let endpoints = Endpoints {
            api_root: "mailto:someone@example.com".to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
        };
        assert!(endpoints.api_root_url().is_err());
        assert!(endpoints.token_url().is_ok());
    }
}
