//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use peticao::{Pipeline, SupplementaryFields, WorkflowSession};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The session being driven.
    pub session: Arc<RwLock<WorkflowSession>>,
    /// Path to the session file.
    pub session_path: PathBuf,
    /// Pay statement the session extracts from.
    pub source_path: PathBuf,
    /// Petition template the session fills.
    pub template_path: PathBuf,
    /// Fields merged over the extracted ones.
    pub supplementary: Arc<SupplementaryFields>,
    pub pipeline: Arc<Pipeline>,
    /// Whether to save the session after each change.
    pub auto_save: bool,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        session: WorkflowSession,
        session_path: PathBuf,
        source_path: PathBuf,
        template_path: PathBuf,
        supplementary: SupplementaryFields,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            session_path,
            source_path,
            template_path,
            supplementary: Arc::new(supplementary),
            pipeline: Arc::new(Pipeline::new()),
            auto_save: true,
        }
    }

    /// Save the session to disk.
    pub async fn save(&self) -> Result<(), peticao::PeticaoError> {
        let session = self.session.read().await;
        session.save(&self.session_path)
    }

    /// Save if auto-save is enabled.
    pub async fn persist(&self) -> Result<(), peticao::PeticaoError> {
        if self.auto_save {
            self.save().await?;
        }
        Ok(())
    }
}
