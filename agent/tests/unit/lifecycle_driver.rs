//! Bring-up / bring-down sequencing against a stub runtime.

#![allow(clippy::expect_used)]

use std::path::Path;

use dockhand::application::services::LifecycleDriver;
use dockhand::domain::{LifecycleFault, LifecycleOutcome, Operation};

use crate::helpers::{Answer, StubRuntime};

const DEFINITION: &str = "/work/docker-compose.yml";

fn definition() -> &'static Path {
    Path::new(DEFINITION)
}

#[tokio::test]
async fn bring_up_pulls_then_starts() {
    let driver = LifecycleDriver::new(StubRuntime::new());
    let outcome = driver.bring_up(definition()).await;
    assert!(matches!(outcome, LifecycleOutcome::Success), "{outcome:?}");
    assert_eq!(
        driver.runtime().operations(),
        vec![Operation::Pull, Operation::Up]
    );
    assert!(driver.runtime().is_running(definition()));
}

#[tokio::test]
async fn pull_failure_does_not_block_start() {
    let driver = LifecycleDriver::new(StubRuntime::failing_pull());
    let outcome = driver.bring_up(definition()).await;
    assert!(outcome.is_success(), "{outcome:?}");
    let LifecycleOutcome::PartialFailure(reason) = outcome else {
        panic!("expected a partial failure");
    };
    assert!(reason.contains("pull"), "{reason}");
    assert_eq!(
        driver.runtime().operations(),
        vec![Operation::Pull, Operation::Up]
    );
}

#[tokio::test]
async fn start_failure_is_fatal() {
    let driver = LifecycleDriver::new(StubRuntime::failing_up());
    let outcome = driver.bring_up(definition()).await;
    let LifecycleOutcome::Failure(fault) = outcome else {
        panic!("expected failure");
    };
    assert!(matches!(fault, LifecycleFault::StartFailed { .. }), "{fault:?}");
    assert_eq!(driver.runtime().running(), 0);
}

#[tokio::test]
async fn pull_and_start_failure_reports_only_start() {
    let runtime = StubRuntime {
        pull: Answer::Fail,
        up: Answer::Fail,
        ..StubRuntime::default()
    };
    let driver = LifecycleDriver::new(runtime);
    let outcome = driver.bring_up(definition()).await;
    let LifecycleOutcome::Failure(fault) = outcome else {
        panic!("expected failure");
    };
    assert!(matches!(fault, LifecycleFault::StartFailed { .. }), "{fault:?}");
    assert!(fault.to_string().starts_with("Could not start"));
}

#[tokio::test]
async fn start_timeout_is_reported_as_timeout() {
    let runtime = StubRuntime {
        up: Answer::TimeOut,
        ..StubRuntime::default()
    };
    let driver = LifecycleDriver::new(runtime);
    let outcome = driver.bring_up(definition()).await;
    let LifecycleOutcome::Failure(LifecycleFault::Timeout { operation, .. }) = outcome else {
        panic!("expected timeout");
    };
    assert_eq!(operation, Operation::Up);
}

#[tokio::test]
async fn pull_timeout_is_swallowed() {
    let runtime = StubRuntime {
        pull: Answer::TimeOut,
        ..StubRuntime::default()
    };
    let driver = LifecycleDriver::new(runtime);
    assert!(driver.bring_up(definition()).await.is_success());
}

#[tokio::test]
async fn repeated_bring_up_converges_to_one_instance() {
    let driver = LifecycleDriver::new(StubRuntime::new());
    for _ in 0..3 {
        assert!(driver.bring_up(definition()).await.is_success());
    }
    assert_eq!(driver.runtime().running(), 1);
}

#[tokio::test]
async fn up_down_up_ends_running() {
    let driver = LifecycleDriver::new(StubRuntime::new());
    assert!(driver.bring_up(definition()).await.is_success());
    assert!(driver.bring_down(definition()).await.is_success());
    assert_eq!(driver.runtime().running(), 0);
    assert!(driver.bring_up(definition()).await.is_success());
    assert!(driver.runtime().is_running(definition()));
}

#[tokio::test]
async fn bring_down_only_calls_down() {
    let driver = LifecycleDriver::new(StubRuntime::new());
    driver.bring_up(definition()).await;
    let outcome = driver.bring_down(definition()).await;
    assert!(matches!(outcome, LifecycleOutcome::Success), "{outcome:?}");
    assert_eq!(
        driver.runtime().operations(),
        vec![Operation::Pull, Operation::Up, Operation::Down]
    );
}

#[tokio::test]
async fn bring_down_failure_is_stop_fault() {
    let runtime = StubRuntime {
        down: Answer::Fail,
        ..StubRuntime::default()
    };
    let driver = LifecycleDriver::new(runtime);
    let LifecycleOutcome::Failure(fault) = driver.bring_down(definition()).await else {
        panic!("expected failure");
    };
    assert!(matches!(fault, LifecycleFault::StopFailed { .. }), "{fault:?}");
}
