//! A small async client for the Chrome Web Store publishing API.
//!
//! It trades an OAuth2 refresh token for an access token, then uploads a new
//! package, replaces the package of an existing item, or publishes an item.
//!
//! ```no_run
//! # async fn run() -> webstore_publish::ApiResult<()> {
//! use webstore_publish::{ClientConfig, Package};
//!
//! let config = ClientConfig::new("client-id", "client-secret", "refresh-token")
//!     .extension_id("abcdefghijklmnopabcdefghijklmnop");
//! let client = webstore_publish::client(config)?;
//!
//! // Reuse one token across both calls rather than refreshing twice.
//! let token = client.fetch_token().await?;
//! let package = Package::open("extension.zip").await?;
//! client.upload_existing(Some(package), Some(&token)).await?;
//! client.publish(None, Some(&token)).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
mod error;
mod oauth;

pub use api::{ApiClient, Package, DEFAULT_PUBLISH_TARGET, TRUSTED_TESTERS_PUBLISH_TARGET};
pub use config::{ClientConfig, Credentials, Endpoints};
pub use error::{ApiError, ApiResult, ConfigError, ErrorKind};

/// Creates a ready-to-use client from the given configuration.
pub fn client(config: ClientConfig) -> ApiResult<ApiClient> {
    ApiClient::new(config)
}
