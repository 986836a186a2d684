mod client;
pub mod http_client;
mod package;

pub use client::{ApiClient, DEFAULT_PUBLISH_TARGET, TRUSTED_TESTERS_PUBLISH_TARGET};
pub use package::Package;
