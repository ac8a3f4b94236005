use crate::error::AgentError;
use crate::event::Event;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the host remembers about an agent between invocations.
/// Stored as state.json alongside the event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub last_check_at: Option<DateTime<Utc>>,
    pub last_event_at: Option<DateTime<Utc>>,
    pub last_error_log_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl AgentState {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join("state.json")
    }

    /// Read state from `dir`, or start empty when none was saved yet.
    pub fn load(dir: &Path) -> Result<Self, AgentError> {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, dir: &Path) -> Result<(), AgentError> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), json)?;
        Ok(())
    }

    pub fn record_event(&mut self, event: &Event) {
        self.last_check_at = Some(event.created_at);
        self.last_event_at = Some(event.created_at);
    }

    pub fn record_error(&mut self, message: String) {
        let now = Utc::now();
        self.last_check_at = Some(now);
        self.last_error_log_at = Some(now);
        self.last_error = Some(message);
    }

    /// An event was produced within the last `period_days` and no error was
    /// logged within that same window.
    pub fn is_working(&self, period_days: f64, now: DateTime<Utc>) -> bool {
        if period_days <= 0.0 || !period_days.is_finite() {
            return false;
        }
        // A window reaching past chrono's range covers every past timestamp.
        let window_start = Duration::try_seconds((period_days * 86_400.0) as i64)
            .and_then(|period| now.checked_sub_signed(period));
        let in_window = |t: DateTime<Utc>| window_start.map_or(true, |start| t > start);

        let event_recent = self.last_event_at.is_some_and(in_window);
        let error_recent = self.last_error_log_at.is_some_and(in_window);

        event_recent && !error_recent
    }
}
