//! Rolesmith configuration
//!
//! Loaded from TOML at startup, falls back to defaults if no config file
//! exists or it fails to parse.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = ".rolesmith.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RolesmithConfig {
    /// Where role, thought, execution and knowledge files are found.
    pub resources: ResourceConfig,
    /// Cognition network lookup.
    pub cognition: CognitionConfig,
    /// Artifact installation into the host tool.
    pub install: InstallConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Extra resource roots, searched after the project and user roots.
    pub roots: Vec<PathBuf>,
    /// Include `<project>/.promptx/resource`.
    pub project_root: bool,
    /// Include `<home>/.promptx/resource`.
    pub user_root: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CognitionConfig {
    /// Per-user data root. Empty means the home directory.
    pub data_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Host tool directory, relative to the project.
    pub target_dir: PathBuf,
    /// Tool restriction list written into generated artifacts. Empty: no restriction.
    pub tools: Vec<String>,
    /// Prepended to generated artifact names.
    pub name_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset.
    pub filter: String,
}

// ============================================================
// Defaults
// ============================================================

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            project_root: true,
            user_root: true,
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(".claude"),
            tools: Vec::new(),
            name_prefix: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "rolesmith=info".into(),
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl RolesmithConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Resource roots in search order: project, user, then configured extras.
    pub fn resource_roots(&self, project: &Path) -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if self.resources.project_root {
            roots.push(project.join(".promptx").join("resource"));
        }
        if self.resources.user_root {
            if let Some(home) = dirs::home_dir() {
                roots.push(home.join(".promptx").join("resource"));
            }
        }
        roots.extend(self.resources.roots.iter().map(|r| {
            if r.is_absolute() {
                r.clone()
            } else {
                project.join(r)
            }
        }));
        roots
    }

    /// Explicitly configured cognition root. `None` leaves the choice to the caller.
    pub fn cognition_root(&self) -> Option<PathBuf> {
        self.cognition
            .data_root
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
    }

    pub fn target_dir(&self, project: &Path) -> PathBuf {
        if self.install.target_dir.is_absolute() {
            self.install.target_dir.clone()
        } else {
            project.join(&self.install.target_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: RolesmithConfig = toml::from_str(
            "[install]\ntools = [\"Read\"]\n\n[resources]\nuser_root = false\n",
        )
        .unwrap();
        assert_eq!(config.install.tools, vec!["Read"]);
        assert_eq!(config.install.target_dir, PathBuf::from(".claude"));
        assert!(config.resources.project_root);
        assert!(!config.resources.user_root);
        assert_eq!(config.logging.filter, "rolesmith=info");
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = RolesmithConfig::default().to_toml();
        let parsed: RolesmithConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.install.target_dir, PathBuf::from(".claude"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = RolesmithConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(config.resources.roots.is_empty());
    }

    #[test]
    fn relative_roots_resolve_against_project() {
        let mut config = RolesmithConfig::default();
        config.resources.project_root = false;
        config.resources.user_root = false;
        config.resources.roots = vec![PathBuf::from("vendor/roles"), PathBuf::from("/abs/roles")];
        let roots = config.resource_roots(Path::new("/proj"));
        assert_eq!(
            roots,
            vec![PathBuf::from("/proj/vendor/roles"), PathBuf::from("/abs/roles")]
        );
    }

    #[test]
    fn explicit_cognition_root_wins() {
        let mut config = RolesmithConfig::default();
        config.cognition.data_root = Some(PathBuf::from("/data"));
        assert_eq!(config.cognition_root(), Some(PathBuf::from("/data")));
    }

    #[test]
    fn blank_cognition_root_is_unset() {
        let mut config = RolesmithConfig::default();
        assert_eq!(config.cognition_root(), None);
        config.cognition.data_root = Some(PathBuf::new());
        assert_eq!(config.cognition_root(), None);
    }
}
