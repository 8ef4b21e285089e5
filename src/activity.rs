use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

use crate::config::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub timestamp: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Append-only JSONL log of what the client did (logins, status changes,
/// task creation). The TUI owns the terminal, so this is where history goes.
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            path: data_dir().join("activity.jsonl"),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn record(&self, event: &str, task_id: Option<i64>, detail: Option<&str>) -> Result<()> {
        let entry = ActivityEvent {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event: event.to_string(),
            task_id,
            detail: detail.map(String::from),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(&entry)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    pub fn recent(&self, limit: usize) -> Vec<ActivityEvent> {
        if !self.path.exists() {
            return Vec::new();
        }
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        let mut events: Vec<ActivityEvent> = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        let len = events.len();
        if len > limit {
            events = events.split_off(len - limit);
        }
        events
    }
}
