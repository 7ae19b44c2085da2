use std::sync::Arc;

use crate::config::Config;
use crate::embedding::Provider;
use crate::search::snapshot::{IndexHandle, Snapshot};
use crate::store::{FaqStore, JsonFaqStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn FaqStore>,
    pub index: Arc<IndexHandle>,
    pub provider: Provider,
    pub http_client: reqwest::Client,
    /// Serializes rebuilds: one writer, searches keep reading the previous
    /// snapshot.
    pub rebuild_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;

        let store = JsonFaqStore::open_or_create(&config.store_path)?;
        let provider = config.embedding.provider.parse::<Provider>()?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(config.embedding.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            store: Arc::new(store),
            index: Arc::new(IndexHandle::new()),
            provider,
            http_client,
            rebuild_lock: Arc::new(tokio::sync::Mutex::new(())),
        })
    }

    /// Build a fresh snapshot from the store and swap it in. Readers in
    /// flight keep the snapshot they already loaded.
    pub async fn rebuild_index(&self) -> anyhow::Result<Arc<Snapshot>> {
        let _guard = self.rebuild_lock.lock().await;

        let entries = self.store.list_all()?;
        let snapshot = Arc::new(Snapshot::build(entries, self.config.embedding.dimension));

        tracing::info!(
            entries = snapshot.len(),
            embedded = snapshot.embedded_count(),
            vocab = snapshot.tfidf.vocab_size(),
            "index rebuilt"
        );

        self.index.install(snapshot.clone());
        Ok(snapshot)
    }
}
