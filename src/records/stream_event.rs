use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Batch delivered by the trigger. Records stay untyped until the shape gate
/// has looked at the first one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StreamEvent {
    /// `None` unless `Records` is a JSON array
    #[serde(rename = "Records", default, deserialize_with = "records_or_none")]
    pub records: Option<Vec<Value>>,
}

impl StreamEvent {
    /// Accepts any JSON payload. `null` is an absent event; anything that is
    /// not an object becomes an event without records, so the handler reports
    /// it instead of the decoder.
    pub fn from_payload(payload: Value) -> Option<Self> {
        match payload {
            Value::Null => None,
            Value::Object(_) => Some(serde_json::from_value(payload).unwrap_or_default()),
            _ => Some(StreamEvent::default()),
        }
    }
}

fn records_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(records) => Ok(Some(records)),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamRecord {
    pub kinesis: KinesisPayload,
    #[serde(rename = "eventSource", default)]
    pub event_source: Option<String>,
    #[serde(rename = "eventID", default)]
    pub event_id: Option<String>,
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    #[serde(rename = "awsRegion", default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KinesisPayload {
    /// base64 encoded payload
    pub data: String,
    #[serde(default)]
    pub partition_key: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<String>,
    #[serde(default)]
    pub approximate_arrival_timestamp: Option<f64>,
}

impl StreamRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).context("record is not a stream record")
    }

    pub fn decode_data(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(self.kinesis.data.as_bytes())
            .map_err(|err| anyhow!("record {} has undecodable data: {}", self.sequence(), err))
    }

    pub fn sequence(&self) -> &str {
        self.kinesis.sequence_number.as_deref().unwrap_or("<unknown>")
    }
}

/// Shape gate: a record counts when its `kinesis.data` is present and not a
/// falsy scalar (`null`, `false`, `0`, `""`).
pub fn is_stream_record(value: &Value) -> bool {
    match value.get("kinesis").and_then(|kinesis| kinesis.get("data")) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(data)) => !data.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    }
}

/// Debug view of a forwarded batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub count: usize,
    pub decoded_bytes: usize,
    pub undecodable: usize,
}

pub fn summarize(records: &[Value]) -> RecordSummary {
    records.iter().fold(
        RecordSummary { count: records.len(), ..Default::default() },
        |mut summary, value| {
            match StreamRecord::from_value(value).and_then(|record| record.decode_data()) {
                Ok(bytes) => summary.decoded_bytes += bytes.len(),
                Err(_) => summary.undecodable += 1,
            }
            summary
        },
    )
}
