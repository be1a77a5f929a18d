/// Failure kinds produced while resolving an access token.
///
/// Fields only exist on the variants that carry them. `debug_info` is meant for
/// log output and never crosses the outcome channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OAuthError {
    /// Invalid input parameters; raised before any network call.
    #[error("{message}")]
    Configuration { message: String },

    /// The authorization server answered with a non-2xx status.
    #[error("{message}")]
    Service {
        message: String,
        status_code: u16,
        debug_info: String,
    },

    /// The authorization server answered, but without a usable `access_token`.
    #[error("{message}")]
    InvalidAccessTokenResponse {
        message: String,
        status_code: u16,
        debug_info: String,
    },

    /// The request went out and nothing came back.
    #[error("{message}")]
    NoResponse { message: String, debug_info: String },

    /// Anything the other variants do not describe, such as a request that
    /// could not be built.
    #[error("{message}")]
    Unknown { message: String, debug_info: String },
}

pub const KIND_CONFIGURATION: &str = "function-parameter-error";
pub const KIND_SERVICE: &str = "oauth-service-error";
pub const KIND_INVALID_ACCESS_TOKEN_RESPONSE: &str = "invalid-access-token-response";
pub const KIND_NO_RESPONSE: &str = "oauth-no-response";
pub const KIND_UNKNOWN: &str = "unknown-error";

impl OAuthError {
    pub fn configuration(message: impl Into<String>) -> Self {
        OAuthError::Configuration { message: message.into() }
    }

    pub fn unknown(message: impl Into<String>, debug_info: impl Into<String>) -> Self {
        OAuthError::Unknown {
            message: message.into(),
            debug_info: debug_info.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OAuthError::Configuration { .. } => KIND_CONFIGURATION,
            OAuthError::Service { .. } => KIND_SERVICE,
            OAuthError::InvalidAccessTokenResponse { .. } => KIND_INVALID_ACCESS_TOKEN_RESPONSE,
            OAuthError::NoResponse { .. } => KIND_NO_RESPONSE,
            OAuthError::Unknown { .. } => KIND_UNKNOWN,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            OAuthError::Service { status_code, .. }
            | OAuthError::InvalidAccessTokenResponse { status_code, .. } => Some(*status_code),
            OAuthError::Configuration { .. }
            | OAuthError::NoResponse { .. }
            | OAuthError::Unknown { .. } => None,
        }
    }

    pub fn debug_info(&self) -> Option<&str> {
        match self {
            OAuthError::Configuration { .. } => None,
            OAuthError::Service { debug_info, .. }
            | OAuthError::InvalidAccessTokenResponse { debug_info, .. }
            | OAuthError::NoResponse { debug_info, .. }
            | OAuthError::Unknown { debug_info, .. } => Some(debug_info.as_str()),
        }
    }

    /// Whether the failure was classified against the token endpoint contract.
    /// Only `Unknown` is unexpected.
    pub fn is_classified(&self) -> bool {
        !matches!(self, OAuthError::Unknown { .. })
    }
}
