use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use super::types::ItemId;
use super::DispatchSink;
use crate::error::DispatchError;

#[derive(Serialize)]
struct DispatchRecord<'a> {
    destination: &'a str,
    item_ids: &'a [ItemId],
    focus: bool,
}

/// Appends one JSON line per dispatch to a file that the host library
/// (or a small bridge script) picks up.
pub struct OutboxSink {
    path: PathBuf,
    focus: bool,
}

impl OutboxSink {
    pub fn new(path: PathBuf, focus: bool) -> Self {
        Self { path, focus }
    }
}

impl DispatchSink for OutboxSink {
    fn send(&mut self, destination: &str, item_ids: &[ItemId]) -> Result<(), DispatchError> {
        if destination.trim().is_empty() {
            return Err(DispatchError::UnknownDestination(destination.to_string()));
        }
        let record = DispatchRecord {
            destination,
            item_ids,
            focus: self.focus,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::debug!(
            "Wrote {} ids for '{}' to {}",
            item_ids.len(),
            destination,
            self.path.display()
        );
        Ok(())
    }
}

/// Sink that only logs; used when no outbox is configured.
#[derive(Debug, Default)]
pub struct LogSink;

impl DispatchSink for LogSink {
    fn send(&mut self, destination: &str, item_ids: &[ItemId]) -> Result<(), DispatchError> {
        tracing::info!("Dispatch to '{}': {:?}", destination, item_ids);
        Ok(())
    }
}
