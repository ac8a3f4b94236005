use chrono::Utc;
use ecs_core::{AgentState, Settings};

pub fn run(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let state = AgentState::load(&settings.data_dir())?;
    let period = settings.options.expected_update_period_in_days.unwrap_or(0.0);
    let working = state.is_working(period, Utc::now());

    if json {
        let report = serde_json::json!({
            "agent": settings.agent.id,
            "working": working,
            "expected_update_period_in_days": settings.options.expected_update_period_in_days,
            "last_event_at": state.last_event_at.map(|t| t.to_rfc3339()),
            "last_error_log_at": state.last_error_log_at.map(|t| t.to_rfc3339()),
            "last_error": state.last_error,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Agent:      {}", settings.agent.id);
    println!("Working:    {}", if working { "yes" } else { "no" });
    println!(
        "Last event: {}",
        state
            .last_event_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "never".into())
    );
    if let Some(ref err) = state.last_error {
        println!("Last error: {}", err);
    }
    Ok(())
}
