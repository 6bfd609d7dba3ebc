//! JSONL file writer for routing events.
//!
//! Each [`RoutingEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use insight_application::ports::event_logger::{EventLogger, RoutingEvent};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL routing event logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Open (or create) the log at the given path in append mode.
    ///
    /// Creates parent directories as needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLogger for JsonlEventLogger {
    fn log(&self, event: RoutingEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Object payloads are flattened next to type + timestamp
        let record = if let Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                Value::String(event.event_type.to_string()),
            );
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.log(RoutingEvent::new(
            "provider_selected",
            serde_json::json!({"task_id": "quick-insights", "provider": "fast"}),
        ));
        logger.log(RoutingEvent::new(
            "execution_completed",
            serde_json::json!({"task_id": "quick-insights", "succeeded": true}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "provider_selected");
        assert_eq!(lines[0]["provider"], "fast");
        assert!(lines[0].get("timestamp").is_some());
        assert_eq!(lines[1]["succeeded"], true);
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/events.jsonl");

        for _ in 0..2 {
            let logger = JsonlEventLogger::new(&path).unwrap();
            logger.log(RoutingEvent::new("config_updated", serde_json::json!({})));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.log(RoutingEvent::new("note", serde_json::json!("plain text")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain text");
    }
}
