mod common;

use common::valid_options;
use ecs_core::config::{AgentOptions, ContainerDefinition};
use ecs_core::validate::{validate_agent_id, validate_options};

#[test]
fn test_valid_options_have_no_errors() {
    assert!(validate_options(&valid_options()).is_empty());
}

#[test]
fn test_default_options_are_valid() {
    assert!(validate_options(&AgentOptions::defaults()).is_empty());
}

#[test]
fn test_empty_options_report_every_required_field() {
    let errors = validate_options(&AgentOptions::default());
    assert_eq!(
        errors,
        vec![
            "expected_update_period_in_days is required",
            "cluster is required",
            "container_definitions is required",
            "wait_for_task is required",
        ]
    );
}

#[test]
fn test_each_missing_required_field_is_reported() {
    let mut options = valid_options();
    options.cluster = None;
    assert_eq!(validate_options(&options), vec!["cluster is required"]);

    let mut options = valid_options();
    options.container_definitions = None;
    assert_eq!(validate_options(&options), vec!["container_definitions is required"]);

    let mut options = valid_options();
    options.wait_for_task = None;
    assert_eq!(validate_options(&options), vec!["wait_for_task is required"]);

    let mut options = valid_options();
    options.expected_update_period_in_days = None;
    assert_eq!(
        validate_options(&options),
        vec!["expected_update_period_in_days is required"]
    );
}

#[test]
fn test_blank_cluster_and_empty_definitions_count_as_missing() {
    let mut options = valid_options();
    options.cluster = Some("  ".to_string());
    options.container_definitions = Some(Vec::new());
    let errors = validate_options(&options);
    assert!(errors.contains(&"cluster is required".to_string()));
    assert!(errors.contains(&"container_definitions is required".to_string()));
}

#[test]
fn test_wait_for_task_false_is_present() {
    let mut options = valid_options();
    options.wait_for_task = Some(false);
    assert!(validate_options(&options).is_empty());
}

#[test]
fn test_non_positive_period_is_rejected() {
    for days in [0.0, -1.0, f64::NAN] {
        let mut options = valid_options();
        options.expected_update_period_in_days = Some(days);
        assert_eq!(
            validate_options(&options),
            vec!["expected_update_period_in_days must be positive"]
        );
    }
}

#[test]
fn test_container_missing_name_or_image_names_the_field() {
    let mut options = valid_options();
    options.container_definitions = Some(vec![
        ContainerDefinition {
            image: Some("busybox".to_string()),
            ..Default::default()
        },
        ContainerDefinition {
            name: Some("sidecar".to_string()),
            ..Default::default()
        },
    ]);
    assert_eq!(
        validate_options(&options),
        vec![
            "container_definitions[0]: name is required",
            "container_definitions[1]: image is required",
        ]
    );
}

#[test]
fn test_duplicate_container_names_are_rejected() {
    let mut options = valid_options();
    let worker = options.container_definitions.as_ref().unwrap()[0].clone();
    options.container_definitions = Some(vec![worker.clone(), worker]);
    assert_eq!(
        validate_options(&options),
        vec!["container_definitions[1]: duplicate name worker"]
    );
}

#[test]
fn test_agent_id_rules() {
    assert_eq!(validate_agent_id("nightly-batch_01"), None);
    assert!(validate_agent_id("").is_some());
    assert!(validate_agent_id("has space").is_some());
    assert!(validate_agent_id(&"x".repeat(28)).is_some());
    assert_eq!(validate_agent_id(&"x".repeat(27)), None);
}

#[test]
fn test_blank_container_name_and_image_count_as_missing() {
    let mut options = valid_options();
    options.container_definitions = Some(vec![ContainerDefinition {
        name: Some(" ".to_string()),
        image: Some("\t ".to_string()),
        ..Default::default()
    }]);
    assert_eq!(
        validate_options(&options),
        vec![
            "container_definitions[0]: name is required",
            "container_definitions[0]: image is required",
        ]
    );
}

#[test]
fn test_duplicate_names_ignore_surrounding_whitespace() {
    let mut options = valid_options();
    let worker = options.container_definitions.as_ref().unwrap()[0].clone();
    let padded = ContainerDefinition {
        name: Some(" worker ".to_string()),
        ..worker.clone()
    };
    options.container_definitions = Some(vec![worker, padded]);
    assert_eq!(
        validate_options(&options),
        vec!["container_definitions[1]: duplicate name worker"]
    );
}
