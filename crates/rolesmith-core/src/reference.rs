//! Reference tokens: inline `@[!]protocol://resource` markers.
//!
//! Single-level grammar: a token is `@`, an optional `!`, a protocol (no colon,
//! whitespace, `@` or angle brackets), `://`, then a resource that runs until
//! whitespace or an angle bracket. Nothing nests.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Token body shared by the scanner and the content cleaner.
pub const REFERENCE_TOKEN: &str = r"@(!?)([^:\s@<>]+)://([^\s<>]+)";

static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(REFERENCE_TOKEN).expect("reference token regex is valid"));

/// A reference extracted from role text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceReference {
    pub protocol: String,
    pub resource: String,
    /// Written with `@!` (eager load marker). Carried but not used for resolution.
    #[serde(default)]
    pub eager: bool,
}

impl ResourceReference {
    pub fn new(protocol: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            resource: resource.into(),
            eager: false,
        }
    }

    /// Canonical loader address, `@protocol://resource`.
    pub fn address(&self) -> String {
        format!("@{}://{}", self.protocol, self.resource)
    }
}

impl std::fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bang = if self.eager { "!" } else { "" };
        write!(f, "@{}{}://{}", bang, self.protocol, self.resource)
    }
}

pub fn reference_regex() -> &'static Regex {
    &REFERENCE_REGEX
}

/// All references in `text`, in order of appearance.
pub fn extract_references(text: &str) -> Vec<ResourceReference> {
    REFERENCE_REGEX
        .captures_iter(text)
        .map(|caps| ResourceReference {
            protocol: caps[2].to_string(),
            resource: caps[3].to_string(),
            eager: !caps[1].is_empty(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_order_with_eager_flag() {
        let refs = extract_references("Use @!thought://remember then @execution://plan.");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].protocol, "thought");
        assert_eq!(refs[0].resource, "remember");
        assert!(refs[0].eager);
        assert_eq!(refs[1].protocol, "execution");
        assert_eq!(refs[1].resource, "plan.");
        assert!(!refs[1].eager);
    }

    #[test]
    fn resource_stops_at_angle_bracket() {
        let refs = extract_references("<reference>@knowledge://rust</reference>");
        assert_eq!(refs, vec![ResourceReference::new("knowledge", "rust")]);
    }

    #[test]
    fn plain_at_signs_are_not_references() {
        assert!(extract_references("mail me @ home: //nothing").is_empty());
        assert!(extract_references("user@example.com").is_empty());
    }

    #[test]
    fn address_drops_eager_marker() {
        let r = &extract_references("@!execution://summarize")[0];
        assert_eq!(r.address(), "@execution://summarize");
        assert_eq!(r.to_string(), "@!execution://summarize");
    }
}
