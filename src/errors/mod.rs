pub mod oauth_error;

pub use oauth_error::OAuthError;
