//! Shared constants and invariants

pub const DEFAULT_GRANT_TYPE: &str = "client_credentials";

// Environment variables holding the OAuth configuration
/// Fallback deployment environment variable when `APP_ENV` is not set
pub const ENV_NODE_ENV: &str = "NODE_ENV";
pub const DEFAULT_ENVIRONMENT: &str = "development";

pub const ENV_OAUTH_PROVIDER_URL: &str = "OAUTH_PROVIDER_URL";
pub const ENV_OAUTH_CLIENT_ID: &str = "OAUTH_CLIENT_ID";
pub const ENV_OAUTH_CLIENT_SECRET: &str = "OAUTH_CLIENT_SECRET";
pub const ENV_OAUTH_PROVIDER_SCOPE: &str = "OAUTH_PROVIDER_SCOPE";

/// Keys resolved through the secret resolver in production, in this order.
pub const ENCRYPTED_ENV_KEYS: [&str; 3] = [
    ENV_OAUTH_CLIENT_ID,
    ENV_OAUTH_CLIENT_SECRET,
    ENV_OAUTH_PROVIDER_SCOPE,
];

// Outcome channel messages
pub const MSG_SUCCESS: &str =
    "all operations completed successfully; no fatal errors have occurred";
pub const MSG_RECORDS_UNDEFINED: &str = "the event.Records array is undefined";
pub const MSG_NOT_A_STREAM: &str =
    "the event.Records array does not contain a kinesis stream of records to process";
pub const MSG_DECRYPTION_FAILED: &str =
    "an error occurred while decrypting the environment variables";
