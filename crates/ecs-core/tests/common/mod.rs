#![allow(dead_code)]

use ecs_core::config::{AgentOptions, ContainerDefinition, KeyValuePair};
use ecs_core::error::AgentError;
use ecs_core::task::{
    ContainerSummary, RunTaskOutput, RunTaskRequest, TaskDescription, TaskId, TaskStatus,
};
use ecs_core::EcsClient;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const TASK_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task/testing/0b69d5c0d6d44b4e";

/// EcsClient that replays scripted responses and records every call.
pub struct MockEcsClient {
    pub revision: u32,
    pub run_output: Mutex<Option<RunTaskOutput>>,
    pub statuses: Mutex<VecDeque<TaskStatus>>,
    pub fail_register: bool,
    /// Leave the task out of describe responses, as ECS does for `MISSING`.
    pub omit_tasks: bool,
    /// Whether described containers carry their image.
    pub report_images: bool,
    pub registered: Mutex<Vec<(String, Vec<ContainerDefinition>)>>,
    pub runs: Mutex<Vec<RunTaskRequest>>,
    pub describes: Mutex<Vec<(String, Vec<TaskId>)>>,
}

impl Default for MockEcsClient {
    fn default() -> Self {
        Self {
            revision: 7,
            run_output: Mutex::new(Some(RunTaskOutput {
                tasks: vec![TaskId::from_string(TASK_ARN.to_string())],
                failures: Vec::new(),
            })),
            statuses: Mutex::new(VecDeque::from(vec![TaskStatus::Stopped])),
            fail_register: false,
            omit_tasks: false,
            report_images: true,
            registered: Mutex::new(Vec::new()),
            runs: Mutex::new(Vec::new()),
            describes: Mutex::new(Vec::new()),
        }
    }
}

impl MockEcsClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statuses returned by successive describe calls. The last one repeats.
    pub fn with_statuses(self, statuses: Vec<TaskStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_run_output(self, output: RunTaskOutput) -> Self {
        *self.run_output.lock().unwrap() = Some(output);
        self
    }

    pub fn describe_count(&self) -> usize {
        self.describes.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl EcsClient for MockEcsClient {
    async fn register_task_definition(
        &self,
        family: &str,
        container_definitions: &[ContainerDefinition],
    ) -> Result<u32, AgentError> {
        if self.fail_register {
            return Err(AgentError::Orchestration(
                "AccessDeniedException: not authorized".to_string(),
            ));
        }
        self.registered
            .lock()
            .unwrap()
            .push((family.to_string(), container_definitions.to_vec()));
        Ok(self.revision)
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutput, AgentError> {
        self.runs.lock().unwrap().push(request.clone());
        Ok(self.run_output.lock().unwrap().clone().unwrap_or_default())
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        tasks: &[TaskId],
    ) -> Result<Vec<TaskDescription>, AgentError> {
        self.describes
            .lock()
            .unwrap()
            .push((cluster.to_string(), tasks.to_vec()));
        if self.omit_tasks {
            return Ok(Vec::new());
        }
        let status = {
            let mut statuses = self.statuses.lock().unwrap();
            if statuses.len() > 1 {
                statuses.pop_front().unwrap()
            } else {
                statuses.front().cloned().unwrap_or(TaskStatus::Unknown)
            }
        };
        let stopped = status.is_terminal();
        Ok(tasks
            .iter()
            .map(|id| TaskDescription {
                task_id: id.clone(),
                last_status: status.clone(),
                stopped_reason: stopped.then(|| "Essential container in task exited".to_string()),
                containers: vec![ContainerSummary {
                    name: "worker".to_string(),
                    image: self
                        .report_images
                        .then(|| "docker.io/library/ubuntu:14.04".to_string()),
                    last_status: Some(status.to_string()),
                    exit_code: stopped.then_some(0),
                }],
            })
            .collect())
    }
}

/// Options from the canonical example: one ubuntu worker on "testing".
pub fn valid_options() -> AgentOptions {
    AgentOptions {
        cluster: Some("testing".to_string()),
        wait_for_task: Some(true),
        container_definitions: Some(vec![ContainerDefinition {
            name: Some("worker".to_string()),
            image: Some("ubuntu:14.04".to_string()),
            memory: Some(512),
            essential: Some(true),
            command: vec!["/bin/true".to_string()],
            environment: vec![KeyValuePair {
                name: "ASDF".to_string(),
                value: "true".to_string(),
            }],
            extra: serde_json::Map::new(),
        }]),
        expected_update_period_in_days: Some(1.0),
    }
}
