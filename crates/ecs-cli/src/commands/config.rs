use ecs_core::validate::validate_options;
use ecs_core::Settings;
use std::path::Path;

const SAMPLE_SETTINGS: &str = r#"# ECS task agent settings

agent:
  id: nightly-batch

aws:
  cli_path: aws
  # region: us-east-1
  # profile: default

waiter:
  delay_secs: 10
  # timeout_secs: 3600

options:
  cluster: default
  wait_for_task: true
  expected_update_period_in_days: 1
  container_definitions:
    - name: worker
      image: ubuntu:14.04
      memory: 512
      essential: true
      environment:
        - name: ASDF
          value: "true"
"#;

pub fn run(explicit: Option<&Path>, path: bool, init: bool) -> anyhow::Result<()> {
    let config_path = super::settings_path(explicit);

    if path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Settings already exist at: {}", config_path.display());
            println!("Remove them first if you want to reinitialize.");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, SAMPLE_SETTINGS)?;
        println!("Sample settings written to: {}", config_path.display());
        return Ok(());
    }

    println!("Settings path: {}", config_path.display());
    if config_path.exists() {
        let settings = Settings::load_from(&config_path)?;
        let problems = validate_options(&settings.options).len();
        println!("Agent:         {}", settings.agent.id);
        println!("Cluster:       {}", settings.options.cluster());
        println!("Data dir:      {}", settings.data_dir().display());
        println!(
            "Options:       {}",
            if problems == 0 {
                "valid".to_string()
            } else {
                format!("{} problem(s), run `ecs-agent validate`", problems)
            }
        );
    } else {
        println!("Status:        not found");
        println!("Run `ecs-agent config --init` to create one.");
    }

    Ok(())
}
