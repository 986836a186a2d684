use thiserror::Error;

/// Problems with how the client was configured.
/// These are always raised before any request is made.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential was missing or empty.
    /// The field is named by its configuration key, e.g. `clientId`.
    #[error("Option \"{0}\" is required")]
    MissingOption(&'static str),

    /// An id-scoped operation was called on a client without an extension ID.
    #[error("Option \"extensionId\" is required to call {operation}")]
    MissingExtensionId { operation: &'static str },

    /// An endpoint could not be used as a base URL.
    #[error("Invalid endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials, extension ID, or a malformed endpoint.
    Configuration,
    /// Bad arguments passed to an operation.
    Input,
    /// Anything that went wrong talking to the remote service.
    Transport,
}

/// Possible error types while working with the Web Store API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Read stream missing")]
    MissingPackage,

    /// The given access token can't be placed within an HTTP header.
    #[error("Access token contains characters not allowed in a header")]
    InvalidToken,

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The token endpoint answered without an `access_token`.
    #[error("Token response did not contain an access_token")]
    MissingAccessToken,

    #[error("Unable to read package: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Config(_) => ErrorKind::Configuration,
            ApiError::MissingPackage | ApiError::InvalidToken | ApiError::Io(_) => {
                ErrorKind::Input
            }
            ApiError::Reqwest(_) | ApiError::Parse(_) | ApiError::MissingAccessToken => {
                ErrorKind::Transport
            }
        }
    }
}

/// Result type alias for Web Store API operations.
pub type ApiResult<T> = Result<T, ApiError>;
