use crate::errors::AppError;
use crate::storage::persist_data;
use crate::workspace::Workspace;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<Workspace>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, workspace: Workspace) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(workspace)),
        }
    }

    // callers hold the workspace lock; a failed write puts `before` back
    pub async fn commit(&self, workspace: &mut Workspace, before: Workspace) -> Result<(), AppError> {
        if let Err(err) = persist_data(&self.data_path, &workspace.snapshot()).await {
            warn!("persist failed, rolling back: {err}");
            *workspace = before;
            return Err(err);
        }
        Ok(())
    }
}
