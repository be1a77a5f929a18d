//! Client-credentials exchange with the authorization server.
//!
//! Credentials are checked before anything is scheduled: a bad client id,
//! secret or scope fails `fetch_access_token` itself. The provider URL is only
//! checked once the returned future runs, so a blank URL surfaces as a failed
//! fetch. Every failure is mapped to exactly one `OAuthError` variant.

use std::future::Future;
use std::pin::Pin;

use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::OAuthError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::DEFAULT_GRANT_TYPE;

const SERVICE_ERROR_PREFIX: &str = "An error occurred from the OAuth Service";
static SUCCESS_MSG: &str = "success";

/// Deferred token exchange; nothing goes over the wire until it is polled.
pub type TokenFetch = Pin<Box<dyn Future<Output = Result<String, OAuthError>> + Send + 'static>>;

/// Form body of a client-credentials request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthForm {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
    pub scope: String,
}

/// Builds the request body. `grant_type` defaults to `client_credentials`.
pub fn get_oauth_config(
    client_id: &str,
    client_secret: &str,
    scope: &str,
    grant_type: Option<&str>,
) -> Result<OAuthForm, OAuthError> {
    Ok(OAuthForm {
        client_id: require_param("clientId", client_id)?,
        client_secret: require_param("clientSecret", client_secret)?,
        scope: require_param("scope", scope)?,
        grant_type: grant_type.unwrap_or(DEFAULT_GRANT_TYPE).to_owned(),
    })
}

fn require_param(name: &str, value: &str) -> Result<String, OAuthError> {
    if value.trim().is_empty() {
        return Err(OAuthError::configuration(format!(
            "the {} parameter is not defined or invalid; must be of type string and not empty",
            name
        )));
    }
    Ok(value.to_owned())
}

pub fn fetch_access_token(
    client: &Client,
    provider_url: &str,
    client_id: &str,
    client_secret: &str,
    scope: &str,
    grant_type: Option<&str>,
) -> Result<TokenFetch, OAuthError> {
    let form = get_oauth_config(client_id, client_secret, scope, grant_type)?;
    let client = client.clone();
    let provider_url = provider_url.to_owned();

    Ok(Box::pin(async move {
        if provider_url.trim().is_empty() {
            return Err(OAuthError::configuration(
                "the oauthUrl function parameter is not defined or invalid; must be of type string and not empty",
            ));
        }

        let metrics = get_metrics().await;
        let start = get_instant();
        let result = exchange(&client, &provider_url, &form).await;

        let label = match &result {
            Ok(_) => SUCCESS_MSG,
            Err(err) => err.kind(),
        };
        metrics.token_fetches.with_label_values(&[label]).inc();
        metrics
            .token_fetch_duration
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        if let Err(err) = &result {
            error!(
                kind = err.kind(),
                status_code = err.status_code(),
                debug_info = err.debug_info().unwrap_or_default(),
                "{}",
                err
            );
        }
        result
    }))
}

async fn exchange(client: &Client, provider_url: &str, form: &OAuthForm) -> Result<String, OAuthError> {
    debug!("requesting access token from {}", provider_url);
    let response = client
        .post(provider_url)
        .form(form)
        .send()
        .await
        .map_err(|err| classify_transport_error(provider_url, err))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| classify_transport_error(provider_url, err))?;

    classify_response(status, &body)
}

/// Maps a received response onto the token or one failure kind.
///
/// A JSON object without a usable `access_token` is reported as such whatever
/// the status; any other non-2xx answer is a service error.
pub fn classify_response(status: StatusCode, body: &str) -> Result<String, OAuthError> {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let access_token = parsed
        .as_ref()
        .and_then(|value| value.get("access_token"))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty());

    match (&parsed, access_token) {
        (_, Some(token)) if status.is_success() => Ok(token.to_owned()),
        (Some(Value::Object(_)), None) => Err(invalid_access_token(status, body)),
        _ if !status.is_success() => Err(service_error(status, body)),
        _ => Err(invalid_access_token(status, body)),
    }
}

fn invalid_access_token(status: StatusCode, body: &str) -> OAuthError {
    OAuthError::InvalidAccessTokenResponse {
        message: format!(
            "{}; the oAuthResponse object contained an undefined access_token property",
            SERVICE_ERROR_PREFIX
        ),
        status_code: status.as_u16(),
        debug_info: format!("{}: {}", status, body),
    }
}

fn service_error(status: StatusCode, body: &str) -> OAuthError {
    let mut message = format!(
        "{}; the service responded with status code: ({})",
        SERVICE_ERROR_PREFIX,
        status.as_u16()
    );
    if let Some(reason) = status.canonical_reason() {
        message.push_str(&format!(" and status text: ({})", reason));
    }
    OAuthError::Service {
        message,
        status_code: status.as_u16(),
        debug_info: format!("{}: {}", status, body),
    }
}

fn classify_transport_error(provider_url: &str, err: reqwest::Error) -> OAuthError {
    if err.is_builder() {
        return OAuthError::unknown(
            format!("{}; a fatal error occurred before the request was sent", SERVICE_ERROR_PREFIX),
            format!("{:?}", err),
        );
    }
    OAuthError::NoResponse {
        message: format!(
            "{}; the request was made, no response received from OAuth Service",
            SERVICE_ERROR_PREFIX
        ),
        debug_info: format!("POST {}: {}", provider_url, err),
    }
}
