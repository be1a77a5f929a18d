//! Invocation orchestrator.
//!
//! `handler` gates the trigger and sources the configuration,
//! `kinesis_handler` validates it, `process_records` authenticates and reports.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::auth::decision::{resolve_token, spawn_fetch, TokenFetchResult};
use crate::cache::token_cache::TokenCache;
use crate::config::options::InvocationOptions;
use crate::config::secrets::{EnvSecretResolver, SecretResolver};
use crate::config::validator::{validate_options, ValidatedOptions};
use crate::errors::OAuthError;
use crate::handler::outcome::Outcome;
use crate::observability::metrics::get_metrics;
use crate::records::stream_event::{is_stream_record, summarize, StreamEvent};
use crate::sources::oauth2::fetch_access_token;
use crate::utils::constants::{
    ENCRYPTED_ENV_KEYS, MSG_DECRYPTION_FAILED, MSG_NOT_A_STREAM, MSG_RECORDS_UNDEFINED, MSG_SUCCESS,
};

/// Everything an invocation needs besides its event. Built once per process
/// and handed to every invocation.
#[derive(Debug, Clone)]
pub struct HandlerContext<R = EnvSecretResolver> {
    pub cache: TokenCache,
    pub client: Client,
    pub resolver: R,
}

impl<R: SecretResolver> HandlerContext<R> {
    pub fn new(cache: TokenCache, client: Client, resolver: R) -> Self {
        Self { cache, client, resolver }
    }
}

/// Entry point for one triggered batch.
pub async fn handler<R: SecretResolver>(event: Option<StreamEvent>, ctx: &HandlerContext<R>) -> Outcome {
    let outcome = dispatch(event, ctx).await;
    get_metrics()
        .await
        .invocations
        .with_label_values(&[outcome.label()])
        .inc();
    outcome
}

async fn dispatch<R: SecretResolver>(event: Option<StreamEvent>, ctx: &HandlerContext<R>) -> Outcome {
    let records = match event.and_then(|event| event.records).filter(|records| !records.is_empty()) {
        Some(records) => records,
        None => {
            error!("[handler]: {}", MSG_RECORDS_UNDEFINED);
            return Outcome::Fault(MSG_RECORDS_UNDEFINED.to_owned());
        }
    };

    // only the first record gates the batch
    if !is_stream_record(&records[0]) {
        error!("[handler]: {}", MSG_NOT_A_STREAM);
        return Outcome::Fault(MSG_NOT_A_STREAM.to_owned());
    }

    if !ctx.cache.is_production() {
        info!("executing kinesis handler in development mode, without decryption");
        return kinesis_handler(records, Some(&InvocationOptions::from_env()), ctx).await;
    }

    match ctx.resolver.resolve(&ENCRYPTED_ENV_KEYS).await {
        Ok(decrypted) => kinesis_handler(records, Some(&InvocationOptions::from_decrypted(&decrypted)), ctx).await,
        Err(err) => {
            error!(debug_info = %err, "[handler]: {}", MSG_DECRYPTION_FAILED);
            Outcome::Fault(MSG_DECRYPTION_FAILED.to_owned())
        }
    }
}

/// Validates the configuration before anything touches the network. Only the
/// message of a validation failure leaves this function.
pub async fn kinesis_handler<R: SecretResolver>(
    records: Vec<Value>,
    options: Option<&InvocationOptions>,
    ctx: &HandlerContext<R>,
) -> Outcome {
    match validate_options(options) {
        Ok(validated) => process_records(records, &validated, ctx).await,
        Err(err) => {
            error!(kind = err.kind(), "[kinesis handler]: {}", err);
            Outcome::Fault(err.to_string())
        }
    }
}

pub async fn process_records<R: SecretResolver>(
    records: Vec<Value>,
    options: &ValidatedOptions,
    ctx: &HandlerContext<R>,
) -> Outcome {
    let result = match authenticate(options, &ctx.client, &ctx.cache).await {
        Ok(result) => result,
        Err(err) if err.is_classified() => {
            error!(
                kind = err.kind(),
                status_code = err.status_code(),
                "a fatal error occurred, the batch will NOT be retried; {}",
                err
            );
            return Outcome::Recovered(err.to_string());
        }
        Err(err) => {
            error!(
                kind = err.kind(),
                debug_info = err.debug_info().unwrap_or_default(),
                "[process records]: an unhandled error occurred; {}",
                err
            );
            return Outcome::Fault(err.to_string());
        }
    };

    if result.is_fresh() {
        info!("obtained a new access token from the OAuth service");
        // single writer: only this path stores into the cache
        ctx.cache.set(result.token()).await;
    } else {
        get_metrics().await.cache_hits.inc();
        info!("using existing access token from cache");
    }

    let summary = summarize(&records);
    debug!(
        records = summary.count,
        decoded_bytes = summary.decoded_bytes,
        undecodable = summary.undecodable,
        "records forwarded"
    );

    Outcome::Succeeded(MSG_SUCCESS.to_owned())
}

async fn authenticate(
    options: &ValidatedOptions,
    client: &Client,
    cache: &TokenCache,
) -> Result<TokenFetchResult, OAuthError> {
    let cached = cache.get().await;

    // started unconditionally; on a cache hit the exchange is fire-and-forget
    // and its result is discarded
    let pending = spawn_fetch(fetch_access_token(
        client,
        &options.provider_url,
        &options.client_id,
        &options.client_secret,
        &options.scope,
        None,
    )?);

    resolve_token(cached.as_deref(), pending.join()).await
}
