//! Gatekeeper for the per-invocation OAuth configuration.
//!
//! Fields are checked in a fixed order (provider URL, client id, client secret,
//! scope) and only the first violation is reported.

use tracing::debug;

use crate::config::options::InvocationOptions;
use crate::errors::OAuthError;

/// Options that passed validation; every field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub provider_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

/// `None` stands for an options object that was never supplied. A supplied
/// object always goes through the per-field checks, even when every field is
/// absent.
pub fn validate_options(options: Option<&InvocationOptions>) -> Result<ValidatedOptions, OAuthError> {
    let options = options.ok_or_else(|| {
        OAuthError::configuration("missing/undefined opts object configuration parameter")
    })?;

    let provider_url = require("oAuthProviderUrl", &options.o_auth_provider_url)?;
    let client_id = require("oAuthClientId", &options.o_auth_client_id)?;
    let client_secret = require("oAuthClientSecret", &options.o_auth_client_secret)?;
    let scope = require("oAuthProviderScope", &options.o_auth_provider_scope)?;

    debug!("invocation options are valid");
    Ok(ValidatedOptions {
        provider_url,
        client_id,
        client_secret,
        scope,
    })
}

fn require(name: &str, value: &Option<String>) -> Result<String, OAuthError> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| {
            OAuthError::configuration(format!("missing/undefined {} configuration parameter", name))
        })
}
