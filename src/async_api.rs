use crate::export::{export, ExportRequest, ExportedImage};
use crate::member::MemberList;
use crate::rendering::raster::{BlockRasterizer, LogoLoader, NoLogos};
use crate::{Error, Result};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

#[cfg(feature = "remote")]
use crate::embed::{load_embedded, EmbedAttributes, EmbeddedData};
#[cfg(feature = "remote")]
use crate::member::MembersDocument;
#[cfg(feature = "remote")]
use crate::persist::{GitHubConfig, GitHubStore};

enum Command {
    Export(MemberList, ExportRequest, String, oneshot::Sender<Result<ExportedImage>>),
    #[cfg(feature = "remote")]
    Save(MembersDocument, oneshot::Sender<Result<serde_json::Value>>),
    #[cfg(feature = "remote")]
    LoadEmbedded(EmbedAttributes, oneshot::Sender<EmbeddedData>),
    Close(oneshot::Sender<()>),
}

/// Options for [`Worker::spawn`].
pub struct WorkerConfig {
    pub logos: Box<dyn LogoLoader>,
    #[cfg(feature = "remote")]
    pub github: GitHubConfig,
    #[cfg(feature = "remote")]
    pub token: Option<String>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            logos: Box::new(NoLogos),
            #[cfg(feature = "remote")]
            github: GitHubConfig::default(),
            #[cfg(feature = "remote")]
            token: None,
        }
    }
}

/// Async fire-and-await facade over the blocking collaborators.
///
/// A dedicated thread owns the rasterizer and HTTP clients; each call sends
/// one command and awaits its reply. There is no retry: a failure comes
/// back as a single error for the caller to log.
#[derive(Clone)]
pub struct Worker {
    cmd_tx: Sender<Command>,
}

impl Worker {
    /// Spawn the worker thread.
    pub async fn spawn(config: WorkerConfig) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let rasterizer = BlockRasterizer::new(config.logos);

            // Blocking HTTP clients must be built off the async runtime.
            #[cfg(feature = "remote")]
            let (store, http) = {
                let store = match GitHubStore::new(config.github, config.token) {
                    Ok(s) => s,
                    Err(err) => {
                        let _ = init_tx.send(Err(err));
                        return;
                    }
                };
                (store, reqwest::blocking::Client::new())
            };

            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Export(members, request, base_url, resp) => {
                        let res = export(&members, &request, &base_url, &rasterizer);
                        let _ = resp.send(res);
                    }
                    #[cfg(feature = "remote")]
                    Command::Save(document, resp) => {
                        let _ = resp.send(store.save(&document));
                    }
                    #[cfg(feature = "remote")]
                    Command::LoadEmbedded(attrs, resp) => {
                        let _ = resp.send(load_embedded(&http, &attrs));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        init_rx
            .await
            .map_err(|e| Error::Worker(format!("Worker init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    /// Rasterize an export of `members`.
    pub async fn export(
        &self,
        members: MemberList,
        request: ExportRequest,
        base_url: &str,
    ) -> Result<ExportedImage> {
        let (tx, rx) = oneshot::channel();
        let _ = self
            .cmd_tx
            .send(Command::Export(members, request, base_url.to_string(), tx));
        rx.await
            .map_err(|e| Error::Worker(format!("Export canceled: {}", e)))?
    }

    /// Commit the member document to the remote store.
    #[cfg(feature = "remote")]
    pub async fn save(&self, document: MembersDocument) -> Result<serde_json::Value> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Save(document, tx));
        rx.await
            .map_err(|e| Error::Worker(format!("Save canceled: {}", e)))?
    }

    /// Load the data an embedded element points at.
    #[cfg(feature = "remote")]
    pub async fn load_embedded(&self, attrs: EmbedAttributes) -> Result<EmbeddedData> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::LoadEmbedded(attrs, tx));
        rx.await
            .map_err(|e| Error::Worker(format!("LoadEmbedded canceled: {}", e)))
    }

    /// Stop the worker thread.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Worker(format!("Close canceled: {}", e)))
    }
}
