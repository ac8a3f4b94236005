use ecs_core::agent::{DESCRIPTION, EVENT_DESCRIPTION};
use ecs_core::config::DEFAULT_SCHEDULE;
use ecs_core::AgentOptions;

pub fn run() -> anyhow::Result<()> {
    println!("{}\n", DESCRIPTION);
    println!("Default schedule: {}\n", DEFAULT_SCHEDULE);
    println!("Events\n------\n{}\n", EVENT_DESCRIPTION);
    println!("Default options\n---------------");
    print!("{}", serde_yaml::to_string(&AgentOptions::defaults())?);
    Ok(())
}
