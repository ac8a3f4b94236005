use ecs_core::validate::{validate_agent_id, validate_options};
use ecs_core::Settings;

pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let mut errors: Vec<String> = validate_agent_id(&settings.agent.id).into_iter().collect();
    errors.extend(validate_options(&settings.options));

    if errors.is_empty() {
        println!("Agent {} is valid.", settings.agent.id);
        return Ok(());
    }

    println!("Agent {} has {} problem(s):", settings.agent.id, errors.len());
    for e in &errors {
        println!("  - {}", e);
    }
    anyhow::bail!("validation failed")
}
