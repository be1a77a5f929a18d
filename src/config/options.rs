use std::collections::HashMap;
use std::env;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    ENV_OAUTH_CLIENT_ID, ENV_OAUTH_CLIENT_SECRET, ENV_OAUTH_PROVIDER_SCOPE, ENV_OAUTH_PROVIDER_URL,
};

/// Raw OAuth configuration handed to one invocation. Any field may be missing;
/// the validator decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InvocationOptions {
    #[serde(rename = "oAuthProviderUrl")]
    pub o_auth_provider_url: Option<String>,
    #[serde(rename = "oAuthClientId")]
    pub o_auth_client_id: Option<String>,
    #[serde(rename = "oAuthClientSecret")]
    pub o_auth_client_secret: Option<String>,
    #[serde(rename = "oAuthProviderScope")]
    pub o_auth_provider_scope: Option<String>,
}

impl InvocationOptions {
    /// All four values straight from the process environment.
    pub fn from_env() -> Self {
        Self {
            o_auth_provider_url: env::var(ENV_OAUTH_PROVIDER_URL).ok(),
            o_auth_client_id: env::var(ENV_OAUTH_CLIENT_ID).ok(),
            o_auth_client_secret: env::var(ENV_OAUTH_CLIENT_SECRET).ok(),
            o_auth_provider_scope: env::var(ENV_OAUTH_PROVIDER_SCOPE).ok(),
        }
    }

    /// URL from the plain environment, credentials from already decrypted values.
    pub fn from_decrypted(decrypted: &HashMap<String, String>) -> Self {
        Self {
            o_auth_provider_url: env::var(ENV_OAUTH_PROVIDER_URL).ok(),
            o_auth_client_id: decrypted.get(ENV_OAUTH_CLIENT_ID).cloned(),
            o_auth_client_secret: decrypted.get(ENV_OAUTH_CLIENT_SECRET).cloned(),
            o_auth_provider_scope: decrypted.get(ENV_OAUTH_PROVIDER_SCOPE).cloned(),
        }
    }
}
