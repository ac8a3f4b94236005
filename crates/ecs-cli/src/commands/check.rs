use ecs_awscli::AwsCliClient;
use ecs_core::event::JsonlEventSink;
use ecs_core::{AgentError, AgentState, EcsAgent, Settings};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

pub async fn run(settings: &Settings, timeout: Option<u64>) -> anyhow::Result<()> {
    let mut waiter = settings.waiter.to_config();
    if let Some(secs) = timeout {
        waiter.timeout = Some(Duration::from_secs(secs));
    }

    let client = Arc::new(AwsCliClient::new(settings.aws.clone()));
    let agent = EcsAgent::new(settings.agent.id.clone(), settings.options.clone(), client)
        .with_waiter(waiter);

    let data_dir = settings.data_dir();
    let sink = JsonlEventSink::new(&data_dir);
    let mut state = AgentState::load(&data_dir)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling wait");
            on_interrupt.cancel();
        }
    });

    match agent.check(&sink, &cancel).await {
        Ok(event) => {
            state.record_event(&event);
            state.save(&data_dir)?;
            println!("{}", serde_json::to_string_pretty(&event.payload)?);
            Ok(())
        }
        Err(AgentError::Validation(errors)) => {
            for e in &errors {
                eprintln!("  - {}", e);
            }
            anyhow::bail!("Agent {} is not configured correctly", agent.id())
        }
        Err(e) => {
            error!("Check for agent {} failed: {}", agent.id(), e);
            state.record_error(e.to_string());
            state.save(&data_dir)?;
            Err(e.into())
        }
    }
}
