use std::path::Path;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tokio::io::AsyncReadExt;

use crate::records::stream_event::StreamEvent;

pub const STDIN_MARKER: &str = "-";

/// Read one trigger event from a JSON file, or stdin for `-`. A JSON `null`
/// is a valid, absent event. Only malformed JSON is rejected here; a payload
/// of the wrong shape is left for the handler to report.
pub async fn run(event_path: &str) -> Result<Option<StreamEvent>> {
    let content = if event_path == STDIN_MARKER {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        tokio::fs::read_to_string(Path::new(event_path))
            .await
            .map_err(|e| anyhow!("failed to read event file {}: {}", event_path, e))?
    };
    parse_event(&content)
}

pub fn parse_event(content: &str) -> Result<Option<StreamEvent>> {
    let payload: Value =
        serde_json::from_str(content).map_err(|e| anyhow!(format!("Invalid event format: {}", e)))?;
    Ok(StreamEvent::from_payload(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_event_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Records":[{{"kinesis":{{"data":"ZGF0YQ=="}}}}]}}"#).unwrap();

        let event = run(file.path().to_str().unwrap()).await.unwrap().unwrap();
        assert_eq!(event.records.unwrap().len(), 1);
    }

    #[test]
    fn null_is_an_absent_event() {
        assert_eq!(parse_event("null").unwrap(), None);
    }

    #[test]
    fn wrong_shape_still_parses() {
        let event = parse_event(r#"{"Records":"nope"}"#).unwrap().unwrap();
        assert_eq!(event.records, None);
        assert_eq!(parse_event("42").unwrap(), Some(StreamEvent::default()));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_event("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid event format"));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = run("/definitely/not/here.json").await.unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
