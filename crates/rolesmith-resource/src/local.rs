//! Local filesystem loader: serves resources from one or more resource roots.
//!
//! Layout is discovered, not prescribed: any file named `<id>.<protocol>.md`
//! under a root registers as `@<protocol>://<id>`, e.g.
//! `role/writer/writer.role.md` or `role/writer/execution/summarize.execution.md`.
//! Roots are searched in order; the first root to provide an id wins.

use crate::loader::{LoadOutcome, ResourceAddress, ResourceLoader};
use rolesmith_core::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const RESOURCE_EXT: &str = "md";

#[derive(Clone, Debug)]
struct RegistryEntry {
    path: PathBuf,
    root: PathBuf,
}

type Registry = HashMap<(String, String), RegistryEntry>;

pub struct LocalFsLoader {
    roots: Vec<PathBuf>,
    registry: OnceCell<Registry>,
}

impl LocalFsLoader {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            registry: OnceCell::new(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    async fn registry(&self) -> Result<&Registry> {
        self.registry
            .get_or_try_init(|| async {
                let roots = self.roots.clone();
                let scan = tokio::task::spawn_blocking(move || scan_roots(&roots))
                    .await
                    .map_err(|e| Error::Internal(format!("registry scan panicked: {}", e)))?;
                info!(
                    "Resource registry ready: {} entries, {} unreadable skipped",
                    scan.registry.len(),
                    scan.skipped
                );
                Ok::<_, Error>(scan.registry)
            })
            .await
    }

    /// Known resource ids for a protocol, sorted.
    pub async fn ids(&self, protocol: &str) -> Result<Vec<String>> {
        let registry = self.registry().await?;
        let mut ids: Vec<String> = registry
            .keys()
            .filter(|(p, _)| p == protocol)
            .map(|(_, id)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

/// Split `summarize.execution.md` into `("execution", "summarize")`.
fn classify(file_name: &str) -> Option<(String, String)> {
    let stem = file_name.strip_suffix(RESOURCE_EXT)?.strip_suffix('.')?;
    let (id, protocol) = stem.rsplit_once('.')?;
    if id.is_empty() || protocol.is_empty() {
        return None;
    }
    Some((protocol.to_string(), id.to_string()))
}

struct Scan {
    registry: Registry,
    skipped: usize,
}

fn scan_roots(roots: &[PathBuf]) -> Scan {
    let mut registry = Registry::new();
    let mut skipped = 0usize;
    for root in roots {
        if !root.is_dir() {
            debug!("Skipping missing resource root {}", root.display());
            continue;
        }
        let mut found = 0usize;
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = entry.file_name().to_str().and_then(classify) else {
                continue;
            };
            if let std::collections::hash_map::Entry::Vacant(slot) = registry.entry(key) {
                slot.insert(RegistryEntry {
                    path: entry.path().to_path_buf(),
                    root: root.clone(),
                });
                found += 1;
            }
        }
        debug!("Scanned {}: {} resources", root.display(), found);
    }
    Scan { registry, skipped }
}

#[async_trait::async_trait]
impl ResourceLoader for LocalFsLoader {
    async fn initialize(&self) -> Result<()> {
        self.registry().await.map(|_| ())
    }

    fn is_initialized(&self) -> bool {
        self.registry.initialized()
    }

    async fn load_resource(&self, address: &str) -> Result<LoadOutcome> {
        let addr = ResourceAddress::parse(address)?;
        let registry = self.registry().await?;
        let key = (addr.protocol.clone(), addr.resource.clone());
        let Some(entry) = registry.get(&key) else {
            return Ok(LoadOutcome::not_found(format!("{} not registered", addr)));
        };
        let content = tokio::fs::read_to_string(&entry.path)
            .await
            .map_err(|e| Error::resource_load(addr.to_string(), e.to_string()))?;
        debug!("Loaded {} from {} ({} bytes)", addr, entry.path.display(), content.len());
        Ok(LoadOutcome::found(content)
            .with_metadata("path", entry.path.display().to_string())
            .with_metadata("protocol", addr.protocol.clone())
            .with_metadata("root", entry.root.display().to_string()))
    }
}
