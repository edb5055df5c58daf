//! Dependency analysis: resolve the references embedded in a role's sections.
//!
//! All references are resolved concurrently and every resolution is awaited,
//! success or not. Failures are dropped with a warning; nothing propagates.

use futures::future::join_all;
use rolesmith_core::{
    extract_references, Dependency, DependencyBundle, DependencyKind, ResourceReference,
    RoleDocument, SectionMap,
};
use rolesmith_resource::ResourceLoader;
use std::sync::Arc;
use tracing::{debug, warn};

/// References from every present section, personality → principle → knowledge.
pub fn collect_references(sections: &SectionMap) -> Vec<ResourceReference> {
    sections
        .present()
        .flat_map(|(_, text)| extract_references(text))
        .collect()
}

pub struct DependencyAnalyzer {
    loader: Arc<dyn ResourceLoader>,
}

impl DependencyAnalyzer {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self { loader }
    }

    pub async fn analyze_dependencies(&self, doc: &RoleDocument) -> DependencyBundle {
        let references = collect_references(&doc.sections);
        let mut bundle = DependencyBundle::default();
        if references.is_empty() {
            return bundle;
        }

        let outcomes = join_all(references.iter().map(|r| self.resolve(r))).await;

        // outcomes[i] belongs to references[i]
        for (reference, content) in references.iter().zip(outcomes) {
            let (Some(kind), Some(content)) =
                (DependencyKind::from_protocol(&reference.protocol), content)
            else {
                continue;
            };
            bundle.push(kind, Dependency::new(&reference.resource, content));
        }

        debug!(
            "Role {}: {} references, {} thoughts, {} executions, {} knowledges",
            doc.id,
            references.len(),
            bundle.thoughts.len(),
            bundle.executions.len(),
            bundle.knowledges.len()
        );
        bundle
    }

    /// `None` when the load is unsuccessful, empty, or raises.
    async fn resolve(&self, reference: &ResourceReference) -> Option<String> {
        let address = reference.address();
        match self.loader.load_resource(&address).await {
            Ok(mut outcome) => {
                let reason = outcome.error.take();
                let content = outcome.into_content();
                if content.is_none() {
                    warn!(
                        "Dependency {} unavailable: {}",
                        address,
                        reason.as_deref().unwrap_or("no content")
                    );
                }
                content
            }
            Err(e) => {
                warn!("Dependency {} failed to load: {}", address, e);
                None
            }
        }
    }
}
