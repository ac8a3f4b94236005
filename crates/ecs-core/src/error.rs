use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid options: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("ECS request failed: {0}")]
    Orchestration(String),

    #[error("run-task started no task: {}", reasons_or_unknown(.reasons))]
    NoTaskStarted { reasons: Vec<String> },

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Gave up waiting for task {task_id} to stop after {waited:?}")]
    WaitTimedOut { task_id: String, waited: Duration },

    #[error("Wait for task {0} was cancelled")]
    WaitCancelled(String),

    #[error("Event stream error: {0}")]
    EventStream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn reasons_or_unknown(reasons: &[String]) -> String {
    if reasons.is_empty() {
        "no failure reported".to_string()
    } else {
        reasons.join(", ")
    }
}
