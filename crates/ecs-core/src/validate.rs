use crate::config::AgentOptions;
use std::collections::HashSet;

/// Longest agent id that keeps `startedBy` within ECS's 36 characters.
pub const MAX_AGENT_ID_LEN: usize = 27;

/// Check the agent options. An empty list means the options are usable.
pub fn validate_options(options: &AgentOptions) -> Vec<String> {
    let mut errors = Vec::new();

    match options.expected_update_period_in_days {
        None => errors.push("expected_update_period_in_days is required".to_string()),
        Some(days) if days <= 0.0 || !days.is_finite() => {
            errors.push("expected_update_period_in_days must be positive".to_string())
        }
        Some(_) => {}
    }

    if present(&options.cluster).is_none() {
        errors.push("cluster is required".to_string());
    }

    let definitions = options.container_definitions.as_deref().unwrap_or_default();
    if definitions.is_empty() {
        errors.push("container_definitions is required".to_string());
    }

    if options.wait_for_task.is_none() {
        errors.push("wait_for_task is required".to_string());
    }

    let mut seen = HashSet::new();
    for (i, cd) in definitions.iter().enumerate() {
        match present(&cd.name) {
            None => errors.push(format!("container_definitions[{}]: name is required", i)),
            Some(name) => {
                if !seen.insert(name) {
                    errors.push(format!("container_definitions[{}]: duplicate name {}", i, name));
                }
            }
        }
        if present(&cd.image).is_none() {
            errors.push(format!("container_definitions[{}]: image is required", i));
        }
    }

    errors
}

/// The value, unless it is missing or blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Check an agent id: non-empty, at most [`MAX_AGENT_ID_LEN`] characters of
/// `[A-Za-z0-9_-]`.
pub fn validate_agent_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("agent id is required".to_string());
    }
    if id.len() > MAX_AGENT_ID_LEN {
        return Some(format!(
            "agent id {} is longer than {} characters",
            id, MAX_AGENT_ID_LEN
        ));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some(format!(
            "agent id {} may only contain letters, digits, '-' and '_'",
            id
        ));
    }
    None
}
