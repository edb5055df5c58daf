//! Install orchestration: pipeline output handed to an artifact builder.

use crate::config::{InstallConfig, RolesmithConfig};
use rolesmith_builder::{ArtifactBuilder, ArtifactKind, ArtifactRequest, BuildOutcome};
use rolesmith_core::{AssemblyMode, Result, RoleDocument};
use rolesmith_pipeline::{Activation, ActionPipeline, CognitionLoader};
use rolesmith_resource::LocalFsLoader;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Filesystem-backed pipeline for a project, plus the loader for listing roles.
pub fn local_pipeline(config: &RolesmithConfig, project: &Path) -> (ActionPipeline, Arc<LocalFsLoader>) {
    let loader = Arc::new(LocalFsLoader::new(config.resource_roots(project)));
    let cognition = cognition_loader(config, project);
    (ActionPipeline::new(loader.clone(), cognition), loader)
}

/// Configured data root, else the user's home, else the project itself.
pub fn cognition_loader(config: &RolesmithConfig, project: &Path) -> CognitionLoader {
    let cognition = match config.cognition_root() {
        Some(root) => CognitionLoader::new(root),
        None => CognitionLoader::for_current_user().unwrap_or_else(|| {
            warn!("No home directory; looking for cognition networks under the project");
            CognitionLoader::new(project)
        }),
    };
    debug!("Cognition data root: {}", cognition.data_root().display());
    cognition
}

/// Artifact description: the role's own `description` metadata, else a stock line.
pub fn describe(document: &RoleDocument, mode: AssemblyMode) -> String {
    if let Some(text) = document.metadata.get("description").and_then(|v| v.as_str()) {
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }
    match mode {
        AssemblyMode::Command => format!("Activate the {} role", document.id),
        AssemblyMode::Subagent => format!(
            "{} role assistant. Use when a task calls for the {} role.",
            document.id, document.id
        ),
    }
}

pub struct InstallReport {
    pub activation: Activation,
    pub outcome: BuildOutcome,
}

pub struct Installer {
    pipeline: ActionPipeline,
    builder: Arc<dyn ArtifactBuilder>,
    settings: InstallConfig,
}

impl Installer {
    pub fn new(pipeline: ActionPipeline, builder: Arc<dyn ArtifactBuilder>, settings: InstallConfig) -> Self {
        Self {
            pipeline,
            builder,
            settings,
        }
    }

    /// Assemble `role_id` and hand it to the builder. Pipeline failures are
    /// errors; builder failures come back in the report's outcome.
    pub async fn install(
        &self,
        role_id: &str,
        mode: AssemblyMode,
        name: Option<&str>,
    ) -> Result<InstallReport> {
        let activation = self.pipeline.activate(role_id, mode).await?;
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", self.settings.name_prefix, role_id));
        let tools = (!self.settings.tools.is_empty()).then(|| self.settings.tools.clone());

        let request = ArtifactRequest {
            kind: ArtifactKind::from(mode),
            name,
            description: describe(&activation.document, mode),
            content: activation.content.clone(),
            tools,
        };
        let outcome = self.builder.build(request).await;
        if outcome.success {
            info!("Installed role {} as {}", role_id, ArtifactKind::from(mode));
        } else {
            warn!(
                "Builder rejected role {}: {}",
                role_id,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(InstallReport { activation, outcome })
    }
}
