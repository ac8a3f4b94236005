use ecs_core::config::{AwsSettings, ContainerDefinition};
use ecs_core::error::AgentError;
use ecs_core::task::{
    ContainerSummary, RunTaskOutput, RunTaskRequest, TaskDescription, TaskId, TaskStatus,
};
use ecs_core::EcsClient;
use serde::Deserialize;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

/// ECS client that drives the `aws ecs` command line.
/// Credentials and retries are whatever the CLI resolves on its own.
pub struct AwsCliClient {
    settings: AwsSettings,
}

impl AwsCliClient {
    pub fn new(settings: AwsSettings) -> Self {
        Self { settings }
    }

    /// `ecs <operation>` plus the global flags every call shares.
    fn base_args(&self, operation: &str) -> Vec<String> {
        let mut args = vec![
            "ecs".to_string(),
            operation.to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        if let Some(ref region) = self.settings.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        if let Some(ref profile) = self.settings.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        args
    }

    /// Run the aws CLI and return stdout.
    async fn run_cmd(&self, args: &[String]) -> Result<String, AgentError> {
        let aws = self.settings.cli_binary();
        debug!("Running: {} {}", aws, args.join(" "));
        let start = Instant::now();

        let output = Command::new(aws)
            .args(args)
            .env("AWS_PAGER", "")
            .output()
            .await
            .map_err(|e| AgentError::Orchestration(format!("Failed to run {}: {}", aws, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                "{} ecs {} failed (exit={}, {}ms)",
                aws,
                args.get(1).map(String::as_str).unwrap_or(""),
                output.status.code().unwrap_or(-1),
                start.elapsed().as_millis()
            );
            return Err(AgentError::Orchestration(format!(
                "aws ecs {} failed: {}",
                args.get(1).map(String::as_str).unwrap_or(""),
                stderr.trim()
            )));
        }

        debug!(
            "aws ecs {} OK ({}ms, {} bytes)",
            args.get(1).map(String::as_str).unwrap_or(""),
            start.elapsed().as_millis(),
            output.stdout.len()
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait::async_trait]
impl EcsClient for AwsCliClient {
    async fn register_task_definition(
        &self,
        family: &str,
        container_definitions: &[ContainerDefinition],
    ) -> Result<u32, AgentError> {
        let mut args = self.base_args("register-task-definition");
        args.push("--family".to_string());
        args.push(family.to_string());
        args.push("--container-definitions".to_string());
        args.push(serde_json::to_string(container_definitions)?);

        let stdout = self.run_cmd(&args).await?;
        parse_register_output(&stdout)
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutput, AgentError> {
        let mut args = self.base_args("run-task");
        args.extend([
            "--cluster".to_string(),
            request.cluster.clone(),
            "--task-definition".to_string(),
            request.task_definition.to_string(),
            "--count".to_string(),
            request.count.to_string(),
            "--started-by".to_string(),
            request.started_by.clone(),
        ]);

        let stdout = self.run_cmd(&args).await?;
        parse_run_output(&stdout)
    }

    async fn describe_tasks(
        &self,
        cluster: &str,
        tasks: &[TaskId],
    ) -> Result<Vec<TaskDescription>, AgentError> {
        let mut args = self.base_args("describe-tasks");
        args.push("--cluster".to_string());
        args.push(cluster.to_string());
        args.push("--tasks".to_string());
        args.extend(tasks.iter().map(|t| t.0.clone()));

        let stdout = self.run_cmd(&args).await?;
        parse_describe_output(&stdout)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    task_definition: RegisteredTaskDefinition,
}

#[derive(Deserialize)]
struct RegisteredTaskDefinition {
    revision: u32,
}

#[derive(Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<RawTask>,
    #[serde(default)]
    failures: Vec<RawFailure>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    task_arn: String,
    #[serde(default)]
    last_status: Option<String>,
    #[serde(default)]
    stopped_reason: Option<String>,
    #[serde(default)]
    containers: Vec<RawContainer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContainer {
    name: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    last_status: Option<String>,
    #[serde(default)]
    exit_code: Option<i32>,
}

#[derive(Deserialize)]
struct RawFailure {
    #[serde(default)]
    arn: Option<String>,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl RawFailure {
    fn describe(&self) -> String {
        let reason = self.reason.as_deref().unwrap_or("unknown");
        match (&self.arn, &self.detail) {
            (Some(arn), Some(detail)) => format!("{} ({}): {}", reason, arn, detail),
            (Some(arn), None) => format!("{} ({})", reason, arn),
            (None, Some(detail)) => format!("{}: {}", reason, detail),
            (None, None) => reason.to_string(),
        }
    }
}

fn parse_register_output(stdout: &str) -> Result<u32, AgentError> {
    let response: RegisterResponse = serde_json::from_str(stdout)?;
    Ok(response.task_definition.revision)
}

fn parse_run_output(stdout: &str) -> Result<RunTaskOutput, AgentError> {
    let response: TasksResponse = serde_json::from_str(stdout)?;
    Ok(RunTaskOutput {
        tasks: response
            .tasks
            .into_iter()
            .map(|t| TaskId::from_string(t.task_arn))
            .collect(),
        failures: response.failures.iter().map(RawFailure::describe).collect(),
    })
}

fn parse_describe_output(stdout: &str) -> Result<Vec<TaskDescription>, AgentError> {
    let response: TasksResponse = serde_json::from_str(stdout)?;
    for failure in &response.failures {
        debug!("describe-tasks failure: {}", failure.describe());
    }
    Ok(response
        .tasks
        .into_iter()
        .map(|t| TaskDescription {
            task_id: TaskId::from_string(t.task_arn),
            last_status: t
                .last_status
                .as_deref()
                .map(TaskStatus::parse)
                .unwrap_or(TaskStatus::Unknown),
            stopped_reason: t.stopped_reason,
            containers: t
                .containers
                .into_iter()
                .map(|c| ContainerSummary {
                    name: c.name,
                    image: c.image,
                    last_status: c.last_status,
                    exit_code: c.exit_code,
                })
                .collect(),
        })
        .collect())
}
