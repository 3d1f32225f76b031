//! Start/stop/status orchestration through the provider set.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use instances_cli::application::providers::ProviderSet;
use instances_cli::application::registry::Registry;
use instances_cli::application::services::lifecycle;
use instances_cli::domain::{
    Instance, InstanceState, ProviderError, RegistryError, RegistrySnapshot,
};

use crate::helpers::{Call, RecordingCloud, provider_set};

/// A registry tracking `web1 → i-1234` and `db → i-5678`, both on `cloud`.
fn registry(cloud: &str) -> Registry {
    let mut snapshot = RegistrySnapshot::default();
    snapshot
        .instances
        .insert("web1".to_string(), Instance::new("i-1234", cloud));
    snapshot
        .instances
        .insert("db".to_string(), Instance::new("i-5678", cloud));
    Registry::from_snapshot(snapshot).expect("valid snapshot")
}

fn aws(web1: InstanceState) -> (Arc<RecordingCloud>, ProviderSet) {
    let cloud = Arc::new(
        RecordingCloud::new("aws")
            .with("i-1234", web1)
            .with("i-5678", InstanceState::Running),
    );
    let providers = provider_set(&[&cloud]);
    (cloud, providers)
}

#[tokio::test]
async fn status_reports_fresh_remote_state() {
    let (cloud, providers) = aws(InstanceState::Stopped);
    let status = lifecycle::instance_status(&registry("aws"), &providers, "web1")
        .await
        .expect("status");

    assert_eq!(status.state, InstanceState::Stopped);
    assert_eq!(status.instance.name, "web1");
    assert_eq!(cloud.calls(), vec![Call::Status("i-1234".to_string())]);
}

#[tokio::test]
async fn status_of_untracked_name_contacts_no_provider() {
    let (cloud, providers) = aws(InstanceState::Stopped);
    let err = lifecycle::instance_status(&registry("aws"), &providers, "ghost")
        .await
        .expect_err("not tracked");

    assert!(matches!(err, RegistryError::NotFound { ref name } if name == "ghost"));
    assert!(cloud.calls().is_empty());
}

#[tokio::test]
async fn start_stopped_instance_is_forwarded_to_its_provider() {
    let (cloud, providers) = aws(InstanceState::Stopped);
    let started = lifecycle::start_instance(&registry("aws"), &providers, "web1")
        .await
        .expect("start");

    assert_eq!(started.instance.id, "i-1234");
    assert_eq!(cloud.calls(), vec![Call::Start("i-1234".to_string())]);
    assert_eq!(cloud.state("i-1234"), Some(InstanceState::Pending));
}

#[tokio::test]
async fn start_running_instance_reports_already_running() {
    let (cloud, providers) = aws(InstanceState::Running);
    let err = lifecycle::start_instance(&registry("aws"), &providers, "web1")
        .await
        .expect_err("already running");

    assert!(matches!(
        err,
        RegistryError::Provider(ProviderError::AlreadyRunning { ref id }) if id == "i-1234"
    ));
    assert_eq!(cloud.state("i-1234"), Some(InstanceState::Running));
}

#[tokio::test]
async fn stop_requires_running_instance() {
    let (_, providers) = aws(InstanceState::Stopped);
    let err = lifecycle::stop_instance(&registry("aws"), &providers, "web1")
        .await
        .expect_err("not running");
    assert!(matches!(
        err,
        RegistryError::Provider(ProviderError::NotRunning { .. })
    ));

    let stopped = lifecycle::stop_instance(&registry("aws"), &providers, "db")
        .await
        .expect("db is running");
    assert_eq!(stopped.name, "db");
}

#[tokio::test]
async fn provider_resolution_is_case_insensitive() {
    let (cloud, providers) = aws(InstanceState::Stopped);
    lifecycle::instance_status(&registry("AWS"), &providers, "web1")
        .await
        .expect("AWS resolves to aws");
    assert_eq!(cloud.calls().len(), 1);
}

#[tokio::test]
async fn unconfigured_provider_is_a_recoverable_error() {
    let (cloud, providers) = aws(InstanceState::Stopped);
    let registry = registry("gcp");

    let err = lifecycle::start_instance(&registry, &providers, "web1")
        .await
        .expect_err("unsupported");
    assert!(matches!(err, RegistryError::UnsupportedProvider { ref name } if name == "gcp"));
    assert!(cloud.calls().is_empty());
    assert_eq!(registry.len(), 2, "registry is still usable");
}

#[tokio::test]
async fn calls_are_routed_to_the_owning_provider() {
    let aws = Arc::new(RecordingCloud::new("aws").with("i-1234", InstanceState::Running));
    let other = Arc::new(RecordingCloud::new("mock").with("i-5678", InstanceState::Stopped));
    let providers = provider_set(&[&aws, &other]);

    let mut snapshot = RegistrySnapshot::default();
    snapshot
        .instances
        .insert("web1".to_string(), Instance::new("i-1234", "aws"));
    snapshot
        .instances
        .insert("db".to_string(), Instance::new("i-5678", "mock"));
    let registry = Registry::from_snapshot(snapshot).expect("valid");

    lifecycle::start_instance(&registry, &providers, "db")
        .await
        .expect("start db");
    assert!(aws.calls().is_empty());
    assert_eq!(other.calls(), vec![Call::Start("i-5678".to_string())]);
}

#[tokio::test]
async fn opaque_backend_failure_is_passed_through() {
    let cloud = Arc::new(RecordingCloud::failing("aws", "throttled"));
    let providers = provider_set(&[&cloud]);

    let err = lifecycle::instance_status(&registry("aws"), &providers, "web1")
        .await
        .expect_err("backend failure");
    assert!(matches!(err, RegistryError::Provider(ProviderError::Other(_))));
    assert_eq!(err.code(), "PROVIDER_ERROR");
}
