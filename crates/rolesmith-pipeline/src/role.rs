//! Role loading: fetch `@role://<id>` and split it into sections.

use regex::Regex;
use rolesmith_core::{Error, Result, RoleDocument, SectionKind, SectionMap};
use rolesmith_resource::{ResourceAddress, ResourceLoader};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Outermost `<role>` span: first opening tag to last closing tag.
static ROLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<role(?:\s[^>]*)?>(.*)</role>").expect("role regex is valid"));

/// One non-greedy, case-insensitive pattern per section, in `SectionKind::ALL` order.
static SECTION_BLOCKS: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    SectionKind::ALL
        .into_iter()
        .map(|kind| {
            let tag = kind.tag();
            let pattern = format!(r"(?is)<{tag}(?:\s[^>]*)?>(.*?)</{tag}\s*>");
            (kind, Regex::new(&pattern).expect("section regex is valid"))
        })
        .collect()
});

/// Split raw role text into sections. Total: anything malformed is simply absent.
pub fn parse_sections(raw: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    let Some(body) = ROLE_BLOCK.captures(raw).and_then(|c| c.get(1)) else {
        return sections;
    };
    for (kind, regex) in SECTION_BLOCKS.iter() {
        let text = regex
            .captures(body.as_str())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty());
        sections.set(*kind, text);
    }
    sections
}

pub struct RoleLoader {
    loader: Arc<dyn ResourceLoader>,
}

impl RoleLoader {
    pub fn new(loader: Arc<dyn ResourceLoader>) -> Self {
        Self { loader }
    }

    /// Load and parse a role. Loader faults propagate unchanged; an unsuccessful
    /// or empty load becomes `Error::RoleNotFound`.
    pub async fn load_role(&self, role_id: &str) -> Result<RoleDocument> {
        self.loader.initialize().await?;

        let address = ResourceAddress::role(role_id).to_string();
        let mut outcome = self.loader.load_resource(&address).await?;
        let metadata = std::mem::take(&mut outcome.metadata);
        let reason = outcome.error.take();

        let Some(raw) = outcome.into_content() else {
            return Err(Error::role_not_found(
                role_id,
                reason.unwrap_or_else(|| "empty content".to_string()),
            ));
        };

        let sections = parse_sections(&raw);
        debug!(
            "Parsed role {}: {} of 3 sections present",
            role_id,
            sections.present().count()
        );

        Ok(RoleDocument {
            id: role_id.to_string(),
            raw,
            sections,
            metadata,
        })
    }
}
