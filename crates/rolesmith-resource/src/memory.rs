//! In-memory loader: a fixed address→content map.

use crate::loader::{LoadOutcome, ResourceAddress, ResourceLoader};
use rolesmith_core::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::OnceCell;

#[derive(Default)]
pub struct MemoryLoader {
    resources: HashMap<String, String>,
    ready: OnceCell<()>,
    init_runs: AtomicUsize,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource. The address may carry the `!` marker; it is normalized away.
    pub fn with(mut self, address: &str, content: impl Into<String>) -> Self {
        self.insert(address, content);
        self
    }

    pub fn insert(&mut self, address: &str, content: impl Into<String>) {
        let key = ResourceAddress::parse(address)
            .map(|a| a.to_string())
            .unwrap_or_else(|_| address.to_string());
        self.resources.insert(key, content.into());
    }

    /// How many times the one-time setup actually ran (0 or 1).
    pub fn init_runs(&self) -> usize {
        self.init_runs.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ResourceLoader for MemoryLoader {
    async fn initialize(&self) -> Result<()> {
        self.ready
            .get_or_init(|| async {
                self.init_runs.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.ready.initialized()
    }

    async fn load_resource(&self, address: &str) -> Result<LoadOutcome> {
        let addr = ResourceAddress::parse(address)?;
        self.initialize().await?;
        Ok(match self.resources.get(&addr.to_string()) {
            Some(content) => {
                LoadOutcome::found(content.clone()).with_metadata("protocol", addr.protocol)
            }
            None => LoadOutcome::not_found(format!("{} not registered", addr)),
        })
    }
}
