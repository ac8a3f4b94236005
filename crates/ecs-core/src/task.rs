use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier assigned by ECS (the task ARN).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `family:revision` reference to a registered task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinitionRef {
    pub family: String,
    pub revision: u32,
}

impl fmt::Display for TaskDefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.revision)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTaskRequest {
    pub cluster: String,
    pub task_definition: TaskDefinitionRef,
    pub count: u32,
    pub started_by: String,
}

/// What `run-task` handed back: started tasks plus any placement failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTaskOutput {
    pub tasks: Vec<TaskId>,
    pub failures: Vec<String>,
}

/// ECS `lastStatus` of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
    Deleted,
    Unknown,
}

impl TaskStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "PROVISIONING" => TaskStatus::Provisioning,
            "PENDING" => TaskStatus::Pending,
            "ACTIVATING" => TaskStatus::Activating,
            "RUNNING" => TaskStatus::Running,
            "DEACTIVATING" => TaskStatus::Deactivating,
            "STOPPING" => TaskStatus::Stopping,
            "DEPROVISIONING" => TaskStatus::Deprovisioning,
            "STOPPED" => TaskStatus::Stopped,
            "DELETED" => TaskStatus::Deleted,
            _ => TaskStatus::Unknown,
        }
    }

    /// Whether the task has stopped for good.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Stopped | TaskStatus::Deleted)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Provisioning => "PROVISIONING",
            TaskStatus::Pending => "PENDING",
            TaskStatus::Activating => "ACTIVATING",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Deactivating => "DEACTIVATING",
            TaskStatus::Stopping => "STOPPING",
            TaskStatus::Deprovisioning => "DEPROVISIONING",
            TaskStatus::Stopped => "STOPPED",
            TaskStatus::Deleted => "DELETED",
            TaskStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// Per-container outcome from `describe-tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub name: String,
    #[serde(skip)]
    pub image: Option<String>,
    pub last_status: Option<String>,
    pub exit_code: Option<i32>,
}

/// One task as reported by `describe-tasks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription {
    pub task_id: TaskId,
    pub last_status: TaskStatus,
    pub stopped_reason: Option<String>,
    pub containers: Vec<ContainerSummary>,
}

/// Result of one invocation: where the task ran and, once it has
/// stopped, how each container ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRun {
    pub cluster: String,
    pub task_id: TaskId,
    pub image: Option<String>,
    pub containers: Option<Vec<ContainerSummary>>,
}

impl TaskRun {
    pub fn started(cluster: &str, task_id: TaskId) -> Self {
        Self {
            cluster: cluster.to_string(),
            task_id,
            image: None,
            containers: None,
        }
    }

    /// Attach the final container states. The reported image is the first
    /// container's, falling back to `configured_image`.
    pub fn resolve(mut self, description: TaskDescription, configured_image: Option<&str>) -> Self {
        self.image = description
            .containers
            .iter()
            .find_map(|c| c.image.clone())
            .or_else(|| configured_image.map(str::to_string));
        self.containers = Some(description.containers);
        self
    }

    /// Event payload: the full container report once resolved, otherwise
    /// just where the task was started.
    pub fn to_event_payload(&self) -> serde_json::Value {
        match &self.containers {
            Some(containers) => serde_json::json!({
                "task_id": self.task_id.0,
                "image": self.image,
                "containers": containers,
            }),
            None => serde_json::json!({
                "cluster": self.cluster,
                "task_id": self.task_id.0,
            }),
        }
    }
}
