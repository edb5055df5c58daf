//! Rolesmith Builder: package assembled role content for the host CLI tool
//!
//! The pipeline hands over a finished string; a builder decides where and in
//! what envelope it lands. `ClaudeDirBuilder` writes markdown files with YAML
//! front matter into the host tool's directory:
//!   <root>/agents/<name>.md    : subagent definitions
//!   <root>/commands/<name>.md  : slash commands

use rolesmith_core::AssemblyMode;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Agent,
    Command,
}

impl ArtifactKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Agent => "agents",
            Self::Command => "commands",
        }
    }
}

impl From<AssemblyMode> for ArtifactKind {
    fn from(mode: AssemblyMode) -> Self {
        match mode {
            AssemblyMode::Subagent => Self::Agent,
            AssemblyMode::Command => Self::Command,
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Agent => write!(f, "agent"),
            Self::Command => write!(f, "command"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ArtifactRequest {
    pub kind: ArtifactKind,
    pub name: String,
    pub description: String,
    pub content: String,
    /// Tool restriction list. `None` or empty leaves the host default.
    pub tools: Option<Vec<String>>,
}

/// Pass-through result. Builders report failure here rather than erroring.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOutcome {
    pub success: bool,
    pub path: Option<PathBuf>,
    pub error: Option<String>,
}

impl BuildOutcome {
    pub fn written(path: PathBuf) -> Self {
        Self {
            success: true,
            path: Some(path),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

#[async_trait::async_trait]
pub trait ArtifactBuilder: Send + Sync {
    async fn build(&self, request: ArtifactRequest) -> BuildOutcome;
}

#[derive(Serialize)]
struct AgentFrontMatter<'a> {
    name: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<String>,
}

#[derive(Serialize)]
struct CommandFrontMatter<'a> {
    description: &'a str,
    #[serde(rename = "allowed-tools", skip_serializing_if = "Option::is_none")]
    allowed_tools: Option<String>,
}

/// Artifact names become file names: no separators, no traversal.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("artifact name is empty".into());
    }
    if name.contains(['/', '\\']) || name.contains("..") || name.starts_with('.') {
        return Err(format!("invalid artifact name: {}", name));
    }
    Ok(())
}

/// Front matter plus body, exactly as written to disk.
pub fn render_artifact(request: &ArtifactRequest) -> Result<String, serde_yaml::Error> {
    let tools = request
        .tools
        .as_ref()
        .filter(|t| !t.is_empty())
        .map(|t| t.join(", "));
    let front = match request.kind {
        ArtifactKind::Agent => serde_yaml::to_string(&AgentFrontMatter {
            name: &request.name,
            description: &request.description,
            tools,
        })?,
        ArtifactKind::Command => serde_yaml::to_string(&CommandFrontMatter {
            description: &request.description,
            allowed_tools: tools,
        })?,
    };
    Ok(format!("---\n{}---\n\n{}\n", front, request.content.trim_end()))
}

/// Writes into a host tool directory such as `<project>/.claude`.
pub struct ClaudeDirBuilder {
    root: PathBuf,
}

impl ClaudeDirBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn artifact_path(&self, kind: ArtifactKind, name: &str) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("{}.md", name))
    }
}

#[async_trait::async_trait]
impl ArtifactBuilder for ClaudeDirBuilder {
    async fn build(&self, request: ArtifactRequest) -> BuildOutcome {
        if let Err(e) = validate_name(&request.name) {
            warn!("Refusing to build {}: {}", request.kind, e);
            return BuildOutcome::failed(e);
        }
        let text = match render_artifact(&request) {
            Ok(t) => t,
            Err(e) => return BuildOutcome::failed(format!("front matter: {}", e)),
        };
        let path = self.artifact_path(request.kind, &request.name);
        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                return BuildOutcome::failed(format!("create {}: {}", parent.display(), e));
            }
        }
        if let Err(e) = tokio::fs::write(&path, &text).await {
            return BuildOutcome::failed(format!("write {}: {}", path.display(), e));
        }
        debug!("wrote {} ({} bytes)", path.display(), text.len());
        info!("Built {} '{}' at {}", request.kind, request.name, path.display());
        BuildOutcome::written(path)
    }
}
