//! Batch dispatch

use super::session::BatchSession;
use crate::core::archive::{Archive, DEFAULT_PACKAGE_NAME};
use crate::core::client::{RenderBackend, RenderOptions, TileFile};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

/// Fans a batch of tiles out to a render backend
///
/// # Example
/// ```rust,ignore
/// use tile_batch::core::batch::BatchOrchestrator;
/// use tile_batch::core::client::{RenderClient, RenderOptions};
///
/// let client = Arc::new(RenderClient::new("http://127.0.0.1:8080")?);
/// let orchestrator = BatchOrchestrator::new(client);
///
/// let mut session = orchestrator.submit(files, &RenderOptions::new().with_light("full"));
/// while let Some(outcome) = session.next_outcome().await {
///     println!("{}", outcome.identity());
/// }
/// let package = session.finalize().await?;
/// ```
#[derive(Clone)]
pub struct BatchOrchestrator {
    backend: Arc<dyn RenderBackend>,
    package_name: String,
}

impl BatchOrchestrator {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            backend,
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
        }
    }

    /// Name given to packages finalized from sessions of this orchestrator
    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = package_name.into();
        self
    }

    /// Dispatch every file at once and return the session tracking them.
    ///
    /// Must be called inside a Tokio runtime. Requests are never cancelled:
    /// dropping the session leaves in-flight tasks running, and their results
    /// are discarded when they settle.
    pub fn submit(&self, files: Vec<TileFile>, options: &RenderOptions) -> BatchSession {
        let id = Uuid::new_v4();
        let dispatched = files.len();
        let (tx, rx) = mpsc::unbounded_channel();
        info!(batch_id = %id, files = dispatched, light = ?options.light, "Submitting batch");

        for (index, file) in files.into_iter().enumerate() {
            let backend = Arc::clone(&self.backend);
            let options = options.clone();
            let tx = tx.clone();
            let span = info_span!("render", batch_id = %id, index, tile = %file.name);

            tokio::spawn(
                async move {
                    let outcome = backend.render(file, &options).await;
                    if tx.send(outcome).is_err() {
                        debug!("Batch session gone, dropping outcome");
                    }
                }
                .instrument(span),
            );
        }

        let archive = Archive::with_package_name(self.package_name.as_str());
        BatchSession::new(id, dispatched, rx, archive)
    }
}
