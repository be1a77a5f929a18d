// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::env;
use std::net::SocketAddr;

use reqwest::Client;
use serde_json::Value;

use crate::records::stream_event::StreamEvent;
use crate::utils::constants::{
    ENV_OAUTH_CLIENT_ID, ENV_OAUTH_CLIENT_SECRET, ENV_OAUTH_PROVIDER_SCOPE, ENV_OAUTH_PROVIDER_URL,
};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

pub fn kinesis_record(data: &str) -> Value {
    json!({
        "kinesis": {
            "partitionKey": "partitionKey-03",
            "kinesisSchemaVersion": "1.0",
            "data": data,
            "sequenceNumber": "49545115243490985018280067714973144582180062593244200961",
            "approximateArrivalTimestamp": 1428537600.0
        },
        "eventSource": "aws:kinesis",
        "eventID": "shardId-000000000000:49545115243490985018280067714973144582180062593244200961",
        "eventName": "aws:kinesis:record",
        "awsRegion": "us-east-1"
    })
}

pub fn sample_event() -> StreamEvent {
    StreamEvent {
        records: Some(vec![
            kinesis_record("SGVsbG8sIHRoaXMgaXMgYSB0ZXN0IDEyMy4="),
            kinesis_record("c2Vjb25kIHJlY29yZA=="),
        ]),
    }
}

/// Point the plain OAuth environment at `url`; callers must be `#[serial]`.
pub fn set_oauth_env(url: &str) {
    env::set_var(ENV_OAUTH_PROVIDER_URL, url);
    env::set_var(ENV_OAUTH_CLIENT_ID, "clientId");
    env::set_var(ENV_OAUTH_CLIENT_SECRET, "clientSecret");
    env::set_var(ENV_OAUTH_PROVIDER_SCOPE, "scope");
}

pub fn clear_oauth_env() {
    for key in [
        ENV_OAUTH_PROVIDER_URL,
        ENV_OAUTH_CLIENT_ID,
        ENV_OAUTH_CLIENT_SECRET,
        ENV_OAUTH_PROVIDER_SCOPE,
    ] {
        env::remove_var(key);
    }
}
