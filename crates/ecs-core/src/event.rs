use crate::error::AgentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::info;
use uuid::Uuid;

/// A record written to the host's event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub agent_id: String,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl Event {
    pub fn new(agent_id: &str, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_id: agent_id.to_string(),
            created_at: Utc::now(),
            payload,
        }
    }

    /// Produce a JSONL line for the event stream.
    pub fn to_jsonl_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Destination for the events an invocation produces.
pub trait EventSink: Send + Sync {
    fn create_event(&self, agent_id: &str, payload: serde_json::Value)
        -> Result<Event, AgentError>;
}

/// Appends events as JSON lines to `events.jsonl` in a directory.
pub struct JsonlEventSink {
    path: PathBuf,
}

impl JsonlEventSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("events.jsonl"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back the last `limit` events, oldest first. Lines that do not
    /// parse are skipped.
    pub fn read_recent(&self, limit: usize) -> Result<Vec<Event>, AgentError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = std::fs::File::open(&self.path)?;
        let mut events = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(event) = serde_json::from_str::<Event>(&line) {
                events.push(event);
            }
        }
        let skip = events.len().saturating_sub(limit);
        Ok(events.split_off(skip))
    }
}

impl EventSink for JsonlEventSink {
    fn create_event(
        &self,
        agent_id: &str,
        payload: serde_json::Value,
    ) -> Result<Event, AgentError> {
        let event = Event::new(agent_id, payload);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", serde_json::to_string(&event)?)?;
        info!("Event {} written to {}", event.id, self.path.display());
        Ok(event)
    }
}

/// Keeps events in memory. Useful when embedding the agent.
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<Event>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Result<Vec<Event>, AgentError> {
        Ok(self.buffer()?.clone())
    }

    fn buffer(&self) -> Result<MutexGuard<'_, Vec<Event>>, AgentError> {
        self.events
            .lock()
            .map_err(|_| AgentError::EventStream("event buffer lock poisoned".to_string()))
    }
}

impl EventSink for MemoryEventSink {
    fn create_event(
        &self,
        agent_id: &str,
        payload: serde_json::Value,
    ) -> Result<Event, AgentError> {
        let event = Event::new(agent_id, payload);
        self.buffer()?.push(event.clone());
        Ok(event)
    }
}
