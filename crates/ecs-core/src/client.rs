use crate::config::ContainerDefinition;
use crate::error::AgentError;
use crate::task::{RunTaskOutput, RunTaskRequest, TaskDescription, TaskId};

/// The ECS operations the agent relies on. Implementations surface any
/// transport or API failure as an error and never retry on their own.
#[async_trait::async_trait]
pub trait EcsClient: Send + Sync {
    /// Register a new revision of `family`. Returns the revision number.
    async fn register_task_definition(
        &self,
        family: &str,
        container_definitions: &[ContainerDefinition],
    ) -> Result<u32, AgentError>;

    /// Start tasks from a registered definition.
    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutput, AgentError>;

    /// Fetch the current state of the given tasks.
    async fn describe_tasks(
        &self,
        cluster: &str,
        tasks: &[TaskId],
    ) -> Result<Vec<TaskDescription>, AgentError>;
}
