use std::collections::HashMap;
use std::env;

use anyhow::{anyhow, Context, Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::debug;

/// Resolves encrypted configuration values by key.
pub trait SecretResolver {
    fn resolve(
        &self,
        keys: &[&str],
    ) -> impl std::future::Future<Output = Result<HashMap<String, String>, Error>> + Send;
}

/// Reads each key from the process environment, where production deployments
/// store the values base64 encoded. One bad key fails the whole resolution.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretResolver;

impl SecretResolver for EnvSecretResolver {
    async fn resolve(&self, keys: &[&str]) -> Result<HashMap<String, String>, Error> {
        let mut resolved = HashMap::with_capacity(keys.len());
        for key in keys {
            let encoded = env::var(key).map_err(|err| anyhow!("{}: {}", key, err))?;
            resolved.insert((*key).to_owned(), decode_value(key, &encoded)?);
        }
        debug!("resolved {} encrypted values", resolved.len());
        Ok(resolved)
    }
}

fn decode_value(key: &str, encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .with_context(|| format!("{} is not valid base64", key))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid utf-8", key))
}
