//! # Stream Token Handler Library
//!
//! Keeps an OAuth2 client-credentials access token available for a function
//! triggered by batches of streaming records. A token is requested from the
//! authorization server only when the process-lifetime cache is empty.
//!
//! Modules:
//! - `config` — invocation options, validation, secrets and settings
//! - `cache` — single-slot token cache
//! - `sources` — token endpoint client
//! - `auth` — cached vs fresh token decision
//! - `handler` — invocation orchestrator
//! - `records` — streaming event model

pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handler;
pub mod helpers;
pub mod observability;
pub mod records;
pub mod server;
pub mod sources;
pub mod tests;
pub mod utils;


pub use crate::errors::OAuthError;
pub use crate::handler::{handler, HandlerContext, Outcome};
