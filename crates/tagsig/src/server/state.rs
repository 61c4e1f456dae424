use std::{path::PathBuf, sync::Arc};

use dashmap::DashMap;
use tokio::sync::RwLock;
use tower_lsp::{Client, lsp_types::Url};
use tracing::info;

use crate::{
    config::{Settings, TagsSettings},
    cycle::EchoContext,
    document::DocumentStore,
    tags::TagFiles,
};

/// The tagsig backend that implements the Language Server Protocol.
pub struct TagSigServer {
    /// The LSP client handle, used to send log messages back.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Echo state per document, one open call at a time.
    pub(crate) contexts: DashMap<Url, EchoContext>,

    /// Tags files for the current settings and workspace root.
    pub(crate) index: RwLock<Arc<TagFiles>>,

    /// Workspace root, populated during `initialize`. Relative tags file
    /// names resolve against it.
    pub(crate) workspace_root: RwLock<Option<PathBuf>>,

    /// Runtime settings updated from LSP configuration.
    pub(crate) settings: Arc<RwLock<Settings>>,
}

impl TagSigServer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            contexts: DashMap::new(),
            index: RwLock::new(Arc::new(TagFiles::default())),
            workspace_root: RwLock::new(None),
            settings: Arc::new(RwLock::new(Settings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn index_snapshot(&self) -> Arc<TagFiles> {
        Arc::clone(&*self.index.read().await)
    }

    /// Store `settings`, reopening the tags files when they changed or
    /// `force` is set.
    pub(crate) async fn apply_settings(
        &self,
        settings: Settings,
        force: bool,
    ) {
        let tags_changed = self.settings.read().await.tags != settings.tags;
        if force || tags_changed {
            self.reopen_index(&settings.tags).await;
        }
        *self.settings.write().await = settings;
    }

    async fn reopen_index(
        &self,
        tags: &TagsSettings,
    ) {
        let root = self.workspace_root.read().await.clone();
        let index = TagFiles::open_all(&tags.files, root.as_deref(), tags.binary_search);
        info!(
            "Using {} tags file(s): {}",
            index.files().len(),
            index.files().iter().map(|file| file.path().display().to_string()).collect::<Vec<_>>().join(", ")
        );
        *self.index.write().await = Arc::new(index);
        self.contexts.clear();
    }
}
