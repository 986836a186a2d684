mod oauth_client;

pub use oauth_client::refresh_access_token;
