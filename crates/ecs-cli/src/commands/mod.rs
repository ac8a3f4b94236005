pub mod check;
pub mod config;
pub mod describe;
pub mod events;
pub mod validate;
pub mod working;

use ecs_core::Settings;
use std::path::{Path, PathBuf};

pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_path)
}

pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let path = settings_path(explicit);
    if !path.exists() {
        anyhow::bail!(
            "No settings at {}. Run `ecs-agent config --init` to create one.",
            path.display()
        );
    }
    Ok(Settings::load_from(&path)?)
}
