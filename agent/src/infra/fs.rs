//! Workspace store: one directory per workload under a root directory.
//!
//! The workspace path is always `root/<identifier>` and the definition is
//! always `root/<identifier>/docker-compose.yml`; nothing else computes them.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dockhand_common::WorkloadId;
use dockhand_common::config::DEFINITION_FILE_NAME;

use crate::domain::StorageError;

/// Workspace directory mode: owner only.
pub const WORKSPACE_MODE: u32 = 0o700;

/// Definition file mode: owner read/write.
pub const DEFINITION_MODE: u32 = 0o600;

/// Filesystem-backed workspace store.
#[derive(Debug, Clone)]
pub struct LocalWorkspaceStore {
    root: PathBuf,
}

impl LocalWorkspaceStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it is missing.
    pub async fn init(&self) -> Result<(), StorageError> {
        let root = self.root.clone();
        blocking(move || {
            std::fs::create_dir_all(&root).map_err(|source| StorageError::CreateWorkspace {
                path: root.clone(),
                source,
            })
        })
        .await
    }

    #[must_use]
    pub fn workspace_path(&self, id: &WorkloadId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Where the definition for `id` lives, whether or not it exists yet.
    #[must_use]
    pub fn definition_path(&self, id: &WorkloadId) -> PathBuf {
        self.workspace_path(id).join(DEFINITION_FILE_NAME)
    }

    /// Return the workspace for `id`, creating it (mode 0700) if absent.
    pub async fn ensure_workspace(&self, id: &WorkloadId) -> Result<PathBuf, StorageError> {
        let path = self.workspace_path(id);
        let dir = path.clone();
        blocking(move || create_workspace_dir(&dir)).await?;
        Ok(path)
    }

    /// Replace the definition inside `workspace` with `definition`.
    ///
    /// Written to a temporary file in the same directory and renamed over the
    /// target, so a failed write never leaves a truncated definition behind.
    pub async fn write_definition(
        &self,
        workspace: &Path,
        definition: &str,
    ) -> Result<PathBuf, StorageError> {
        let target = workspace.join(DEFINITION_FILE_NAME);
        let dir = workspace.to_path_buf();
        let dest = target.clone();
        let contents = definition.to_owned();
        blocking(move || {
            write_atomically(&dir, &dest, contents.as_bytes()).map_err(|source| {
                StorageError::WriteDefinition {
                    path: dest.clone(),
                    source,
                }
            })
        })
        .await?;
        tracing::debug!(path = %target.display(), bytes = definition.len(), "definition written");
        Ok(target)
    }
}

fn create_workspace_dir(path: &Path) -> Result<(), StorageError> {
    let mut builder = std::fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(WORKSPACE_MODE);
    }
    match builder.create(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "workspace created");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(source) => Err(StorageError::CreateWorkspace {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_atomically(dir: &Path, dest: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = tempfile::Builder::new()
        .prefix(".definition")
        .tempfile_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(DEFINITION_MODE))?;
    }
    tmp.persist(dest).map_err(|err| err.error)?;
    Ok(())
}

async fn blocking<T, F>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| StorageError::Task(err.to_string()))?
}
