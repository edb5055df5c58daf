//! Action pipeline: RoleLoader → DependencyAnalyzer → CognitionLoader → assembly.

use crate::assembler::assemble_content;
use crate::cognition::CognitionLoader;
use crate::dependency::DependencyAnalyzer;
use crate::role::RoleLoader;
use rolesmith_core::{
    AssemblyMode, CognitionStatus, DependencyBundle, Error, Result, RoleDocument,
};
use rolesmith_resource::ResourceLoader;
use std::sync::Arc;
use tracing::{error, info};

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct Activation {
    pub document: RoleDocument,
    pub bundle: DependencyBundle,
    pub cognition: CognitionStatus,
    pub mode: AssemblyMode,
    pub content: String,
}

pub struct ActionPipeline {
    roles: RoleLoader,
    dependencies: DependencyAnalyzer,
    cognition: CognitionLoader,
}

impl ActionPipeline {
    pub fn new(loader: Arc<dyn ResourceLoader>, cognition: CognitionLoader) -> Self {
        Self {
            roles: RoleLoader::new(loader.clone()),
            dependencies: DependencyAnalyzer::new(loader),
            cognition,
        }
    }

    /// Run all four stages. Only a role-loading failure escapes, wrapped in
    /// `Error::ActivationFailed` with the original message.
    pub async fn activate(&self, role_id: &str, mode: AssemblyMode) -> Result<Activation> {
        let document = match self.roles.load_role(role_id).await {
            Ok(doc) => doc,
            Err(e) => {
                error!("Role {} failed to load: {}", role_id, e);
                return Err(Error::activation_failed(role_id, e.to_string()));
            }
        };

        let bundle = self.dependencies.analyze_dependencies(&document).await;
        let cognition = self.cognition.check_network_exists(role_id);
        let content = assemble_content(&document, &bundle, &cognition, mode);

        info!(
            "Activated {} ({} mode): {} thoughts, {} executions, network={}",
            role_id,
            mode,
            bundle.thoughts.len(),
            bundle.executions.len(),
            cognition.has_network
        );

        Ok(Activation {
            document,
            bundle,
            cognition,
            mode,
            content,
        })
    }

    pub async fn process_role(&self, role_id: &str, mode: AssemblyMode) -> Result<String> {
        self.activate(role_id, mode).await.map(|a| a.content)
    }
}
