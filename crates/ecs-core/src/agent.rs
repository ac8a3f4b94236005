use crate::client::EcsClient;
use crate::config::AgentOptions;
use crate::error::AgentError;
use crate::event::{Event, EventSink};
use crate::task::{RunTaskRequest, TaskDefinitionRef, TaskId, TaskRun};
use crate::validate::{validate_agent_id, validate_options};
use crate::waiter::{wait_until_stopped, WaiterConfig};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub const FAMILY_PREFIX: &str = "EcsAgentTask-";
pub const STARTED_BY_PREFIX: &str = "EcsAgent-";

pub const DESCRIPTION: &str = "\
Runs tasks in ECS. Each check registers a task definition built from
`container_definitions` and runs one task of it in `cluster`.

`wait_for_task` decides whether the agent waits for the task to stop before
emitting its event, and which kind of event it emits.";

pub const EVENT_DESCRIPTION: &str = r#"When wait_for_task is true, events describe the stopped task:

  {
    "task_id": "...",
    "image": "...",
    "containers": [
      { "name": "...", "last_status": "...", "exit_code": 0 }
    ]
  }

When wait_for_task is false, events look like:

  {
    "cluster": "...",
    "task_id": "..."
  }"#;

/// One configured ECS agent: validates its options and, on each check,
/// registers, runs and optionally waits for a task, then emits one event.
pub struct EcsAgent {
    id: String,
    options: AgentOptions,
    waiter: WaiterConfig,
    client: Arc<dyn EcsClient>,
}

impl EcsAgent {
    pub fn new(id: String, options: AgentOptions, client: Arc<dyn EcsClient>) -> Self {
        Self {
            id,
            options,
            waiter: WaiterConfig::default(),
            client,
        }
    }

    pub fn with_waiter(mut self, waiter: WaiterConfig) -> Self {
        self.waiter = waiter;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    /// Task definition family owned by this agent.
    pub fn family_name(&self) -> String {
        format!("{}{}", FAMILY_PREFIX, self.id)
    }

    /// Marker put on every task this agent starts.
    pub fn started_by(&self) -> String {
        format!("{}{}", STARTED_BY_PREFIX, self.id)
    }

    /// All configuration problems, agent id included. Empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(err) = validate_agent_id(&self.id) {
            errors.push(err);
        }
        errors.extend(validate_options(&self.options));
        errors
    }

    /// Run one invocation and emit exactly one event on success.
    pub async fn check(
        &self,
        sink: &dyn EventSink,
        cancel: &CancellationToken,
    ) -> Result<Event, AgentError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(AgentError::Validation(errors));
        }

        let task_definition = self.register_task_definition().await?;
        let task_id = self.run_task(&task_definition).await?;

        let cluster = self.options.cluster();
        let mut run = TaskRun::started(cluster, task_id);
        if self.options.waits_for_task() {
            let description =
                wait_until_stopped(self.client.as_ref(), cluster, &run.task_id, &self.waiter, cancel)
                    .await?;
            run = run.resolve(description, self.options.primary_image());
        }

        let event = sink.create_event(&self.id, run.to_event_payload())?;
        info!("Agent {} emitted event {} for task {}", self.id, event.id, run.task_id);
        Ok(event)
    }

    async fn register_task_definition(&self) -> Result<TaskDefinitionRef, AgentError> {
        let family = self.family_name();
        let revision = self
            .client
            .register_task_definition(&family, self.options.container_definitions())
            .await?;
        info!("Registered task definition {}:{}", family, revision);
        Ok(TaskDefinitionRef { family, revision })
    }

    async fn run_task(&self, task_definition: &TaskDefinitionRef) -> Result<TaskId, AgentError> {
        let request = RunTaskRequest {
            cluster: self.options.cluster().to_string(),
            task_definition: task_definition.clone(),
            count: 1,
            started_by: self.started_by(),
        };
        let output = self.client.run_task(&request).await?;
        let task_id = output
            .tasks
            .into_iter()
            .next()
            .ok_or(AgentError::NoTaskStarted {
                reasons: output.failures,
            })?;
        info!(
            "Started task {} from {} on cluster {}",
            task_id, task_definition, request.cluster
        );
        Ok(task_id)
    }
}
