//! Fixed-workload controller: one pre-placed definition, no request body.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, extract::State, http::StatusCode, routing::post};
use tokio::sync::Mutex;

use crate::application::ports::ContainerRuntime;
use crate::application::services::LifecycleDriver;
use crate::domain::LifecycleOutcome;
use crate::server::error::{ApiError, ApiResult};

/// Shared state of the fixed-workload controller.
pub struct FixedAgent<R> {
    driver: LifecycleDriver<R>,
    definition: PathBuf,
    report_failures: bool,
    // Serialises every operation; there is only one workload.
    lock: Mutex<()>,
}

impl<R: ContainerRuntime> FixedAgent<R> {
    #[must_use]
    pub fn new(runtime: R, definition: impl Into<PathBuf>) -> Self {
        Self {
            driver: LifecycleDriver::new(runtime),
            definition: definition.into(),
            report_failures: false,
            lock: Mutex::new(()),
        }
    }

    /// Answer 500 with the fault text instead of always 200.
    #[must_use]
    pub fn report_failures(mut self, report: bool) -> Self {
        self.report_failures = report;
        self
    }

    #[must_use]
    pub fn driver(&self) -> &LifecycleDriver<R> {
        &self.driver
    }

    pub async fn up(&self) -> LifecycleOutcome {
        let _guard = self.lock.lock().await;
        self.driver.bring_up(&self.definition).await
    }

    pub async fn down(&self) -> LifecycleOutcome {
        let _guard = self.lock.lock().await;
        self.driver.bring_down(&self.definition).await
    }

    fn respond(&self, outcome: LifecycleOutcome) -> ApiResult<StatusCode> {
        match outcome.into_result() {
            Ok(_) => Ok(StatusCode::OK),
            Err(fault) if self.report_failures => Err(ApiError::from(fault)),
            Err(fault) => {
                tracing::error!(error = %fault, "lifecycle failure not reported to caller");
                Ok(StatusCode::OK)
            }
        }
    }
}

pub fn router<R: ContainerRuntime>(agent: Arc<FixedAgent<R>>) -> Router {
    Router::new()
        .route("/up", post(up::<R>))
        .route("/down", post(down::<R>))
        .with_state(agent)
}

async fn up<R: ContainerRuntime>(State(agent): State<Arc<FixedAgent<R>>>) -> ApiResult<StatusCode> {
    let outcome = agent.up().await;
    agent.respond(outcome)
}

async fn down<R: ContainerRuntime>(
    State(agent): State<Arc<FixedAgent<R>>>,
) -> ApiResult<StatusCode> {
    let outcome = agent.down().await;
    agent.respond(outcome)
}
