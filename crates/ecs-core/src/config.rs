use crate::error::AgentError;
use crate::waiter::WaiterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Schedule the agent is meant to run on. The host owns scheduling.
pub const DEFAULT_SCHEDULE: &str = "every_1d";

/// Top-level settings file.
/// Loaded from ~/.config/ecs-agent/agent.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub agent: AgentSettings,
    #[serde(default)]
    pub aws: AwsSettings,
    #[serde(default)]
    pub waiter: WaiterSettings,
    #[serde(default)]
    pub options: AgentOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentSettings {
    /// Instance identifier. Feeds the task definition family and `startedBy`.
    pub id: String,
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AwsSettings {
    #[serde(default)]
    pub cli_path: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl AwsSettings {
    /// Get the aws binary path, falling back to "aws".
    pub fn cli_binary(&self) -> &str {
        self.cli_path.as_deref().unwrap_or("aws")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaiterSettings {
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for WaiterSettings {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            timeout_secs: None,
        }
    }
}

fn default_delay_secs() -> u64 {
    10
}

impl WaiterSettings {
    pub fn to_config(&self) -> WaiterConfig {
        WaiterConfig {
            delay: Duration::from_secs(self.delay_secs.max(1)),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Agent options as the host stores them. Every field is optional so that
/// missing keys surface as validation messages rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentOptions {
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub wait_for_task: Option<bool>,
    #[serde(default)]
    pub container_definitions: Option<Vec<ContainerDefinition>>,
    #[serde(default)]
    pub expected_update_period_in_days: Option<f64>,
}

/// One entry of an ECS task definition's container list.
///
/// Keys other than the ones modelled here are kept in `extra` and sent to
/// ECS verbatim, so they must use the API's camelCase spelling
/// (`portMappings`, `logConfiguration`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Hard memory limit in MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<KeyValuePair>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub name: String,
    pub value: String,
}

impl AgentOptions {
    /// Options offered to a freshly created agent. A settings file without
    /// an `options` block gets none of these.
    pub fn defaults() -> Self {
        Self {
            cluster: Some("default".to_string()),
            wait_for_task: Some(true),
            container_definitions: Some(vec![ContainerDefinition {
                name: Some("worker".to_string()),
                image: Some("ubuntu:14.04".to_string()),
                memory: Some(512),
                essential: Some(true),
                command: Vec::new(),
                environment: vec![KeyValuePair {
                    name: "ASDF".to_string(),
                    value: "true".to_string(),
                }],
                extra: serde_json::Map::new(),
            }]),
            expected_update_period_in_days: Some(1.0),
        }
    }

    pub fn cluster(&self) -> &str {
        self.cluster.as_deref().unwrap_or_default()
    }

    pub fn waits_for_task(&self) -> bool {
        self.wait_for_task.unwrap_or(false)
    }

    pub fn container_definitions(&self) -> &[ContainerDefinition] {
        self.container_definitions.as_deref().unwrap_or_default()
    }

    /// Image of the first container definition that names one.
    pub fn primary_image(&self) -> Option<&str> {
        self.container_definitions()
            .iter()
            .find_map(|cd| cd.image.as_deref())
    }
}

impl Settings {
    /// Load settings from the default path (~/.config/ecs-agent/agent.yaml).
    pub fn load_default() -> Result<Self, AgentError> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, AgentError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AgentError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, AgentError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Default settings file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("ecs-agent")
            .join("agent.yaml")
    }

    /// Directory holding this agent's event stream and state.
    pub fn data_dir(&self) -> PathBuf {
        match &self.agent.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join("ecs-agent")
                .join(&self.agent.id),
        }
    }
}
