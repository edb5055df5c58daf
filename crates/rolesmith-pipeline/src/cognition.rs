//! Cognition network check: existence only, the graph is never read.

use rolesmith_core::CognitionStatus;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Existence probe seam. `Ok(false)` means absent; `Err` means the probe itself failed.
pub trait PathProbe: Send + Sync {
    fn exists(&self, path: &Path) -> std::io::Result<bool>;
}

/// Single `stat` against the real filesystem.
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> std::io::Result<bool> {
        path.try_exists()
    }
}

pub struct CognitionLoader {
    data_root: PathBuf,
    probe: Arc<dyn PathProbe>,
}

impl CognitionLoader {
    pub fn new(data_root: impl AsRef<Path>) -> Self {
        Self {
            data_root: data_root.as_ref().to_path_buf(),
            probe: Arc::new(FsProbe),
        }
    }

    /// Rooted at the user's home directory, when one can be determined.
    pub fn for_current_user() -> Option<Self> {
        dirs::home_dir().map(Self::new)
    }

    pub fn with_probe(mut self, probe: Arc<dyn PathProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// `<data_root>/.promptx/cognition/<role_id>/network.json`
    pub fn network_path(&self, role_id: &str) -> PathBuf {
        self.data_root
            .join(".promptx")
            .join("cognition")
            .join(role_id)
            .join("network.json")
    }

    pub fn check_network_exists(&self, role_id: &str) -> CognitionStatus {
        let path = self.network_path(role_id);
        match self.probe.exists(&path) {
            Ok(true) => {
                debug!("Cognition network found for {}: {}", role_id, path.display());
                CognitionStatus::present(path)
            }
            Ok(false) => {
                debug!("No cognition network for {}", role_id);
                CognitionStatus::absent(path)
            }
            Err(e) => {
                warn!("Cognition check failed for {} at {}: {}", role_id, path.display(), e);
                CognitionStatus::failed(e.to_string())
            }
        }
    }
}
