use crate::client::EcsClient;
use crate::error::AgentError;
use crate::task::{TaskDescription, TaskId};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polling parameters for [`wait_until_stopped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterConfig {
    pub delay: Duration,
    /// `None` waits for as long as the task runs.
    pub timeout: Option<Duration>,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(10),
            timeout: None,
        }
    }
}

/// Poll `describe-tasks` until the task reports a terminal status and
/// return that final description.
pub async fn wait_until_stopped<C>(
    client: &C,
    cluster: &str,
    task_id: &TaskId,
    config: &WaiterConfig,
    cancel: &CancellationToken,
) -> Result<TaskDescription, AgentError>
where
    C: EcsClient + ?Sized,
{
    let started = Instant::now();
    let tasks = std::slice::from_ref(task_id);
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        let description = client
            .describe_tasks(cluster, tasks)
            .await?
            .into_iter()
            .find(|t| t.task_id == *task_id)
            .ok_or_else(|| AgentError::TaskNotFound(task_id.to_string()))?;

        if description.last_status.is_terminal() {
            info!(
                "Task {} stopped after {} poll(s), {:?}",
                task_id,
                attempts,
                started.elapsed()
            );
            return Ok(description);
        }
        debug!("Task {} is {} (poll {})", task_id, description.last_status, attempts);

        // The last pause is cut short so the final poll lands on the deadline.
        let pause = match config.timeout {
            Some(timeout) => {
                let waited = started.elapsed();
                if waited >= timeout {
                    warn!("Task {} still {} after {:?}", task_id, description.last_status, waited);
                    return Err(AgentError::WaitTimedOut {
                        task_id: task_id.to_string(),
                        waited,
                    });
                }
                config.delay.min(timeout - waited)
            }
            None => config.delay,
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                warn!("Wait for task {} cancelled", task_id);
                return Err(AgentError::WaitCancelled(task_id.to_string()));
            }
            _ = tokio::time::sleep(pause) => {}
        }
    }
}
