//! Multi-workload controller: definitions arrive over the wire and are
//! persisted per workspace before the lifecycle driver runs.

use std::sync::Arc;

use axum::{Router, body::Bytes, extract::State, http::StatusCode, routing::post};
use dockhand_common::{DownRequest, UpRequest, WorkloadId};

use crate::application::ports::ContainerRuntime;
use crate::application::services::{LifecycleDriver, WorkloadLocks};
use crate::infra::LocalWorkspaceStore;
use crate::server::error::{ApiResult, decode};

/// Shared state of the multi-workload controller.
pub struct MultiAgent<R> {
    driver: LifecycleDriver<R>,
    store: LocalWorkspaceStore,
    locks: WorkloadLocks,
}

impl<R: ContainerRuntime> MultiAgent<R> {
    #[must_use]
    pub fn new(runtime: R, store: LocalWorkspaceStore) -> Self {
        Self {
            driver: LifecycleDriver::new(runtime),
            store,
            locks: WorkloadLocks::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &LocalWorkspaceStore {
        &self.store
    }

    #[must_use]
    pub fn driver(&self) -> &LifecycleDriver<R> {
        &self.driver
    }

    #[must_use]
    pub fn locks(&self) -> &WorkloadLocks {
        &self.locks
    }

    /// Persist `definition` for `id` and bring the workload up.
    pub async fn up(&self, id: &WorkloadId, definition: &str) -> ApiResult<()> {
        let _guard = self.locks.acquire(id.as_str()).await;
        let workspace = self.store.ensure_workspace(id).await?;
        let path = self.store.write_definition(&workspace, definition).await?;
        tracing::info!(workload = %id, definition = %path.display(), "bringing workload up");
        self.driver.bring_up(&path).await.into_result()?;
        Ok(())
    }

    /// Bring the workload down. The workspace and its definition stay on disk.
    pub async fn down(&self, id: &WorkloadId) -> ApiResult<()> {
        let _guard = self.locks.acquire(id.as_str()).await;
        let path = self.store.definition_path(id);
        tracing::info!(workload = %id, definition = %path.display(), "bringing workload down");
        self.driver.bring_down(&path).await.into_result()?;
        Ok(())
    }
}

pub fn router<R: ContainerRuntime>(agent: Arc<MultiAgent<R>>) -> Router {
    Router::new()
        .route("/up", post(up::<R>))
        .route("/down", post(down::<R>))
        .with_state(agent)
}

async fn up<R: ContainerRuntime>(
    State(agent): State<Arc<MultiAgent<R>>>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let request: UpRequest = decode(&body)?;
    let id = WorkloadId::try_from(request.name)?;
    agent.up(&id, &request.file).await?;
    Ok(StatusCode::OK)
}

async fn down<R: ContainerRuntime>(
    State(agent): State<Arc<MultiAgent<R>>>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let request: DownRequest = decode(&body)?;
    let id = WorkloadId::try_from(request.name)?;
    agent.down(&id).await?;
    Ok(StatusCode::OK)
}
