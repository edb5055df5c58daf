//! Core types for Rolesmith

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Named subsection of a `<role>` block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Personality,
    Principle,
    Knowledge,
}

impl SectionKind {
    /// Scan and render order.
    pub const ALL: [SectionKind; 3] = [Self::Personality, Self::Principle, Self::Knowledge];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Principle => "principle",
            Self::Knowledge => "knowledge",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// The three optional sections of a role. Each slot holds trimmed text or nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<String>,
}

impl SectionMap {
    pub fn get(&self, kind: SectionKind) -> Option<&str> {
        match kind {
            SectionKind::Personality => self.personality.as_deref(),
            SectionKind::Principle => self.principle.as_deref(),
            SectionKind::Knowledge => self.knowledge.as_deref(),
        }
    }

    pub fn set(&mut self, kind: SectionKind, text: Option<String>) {
        let slot = match kind {
            SectionKind::Personality => &mut self.personality,
            SectionKind::Principle => &mut self.principle,
            SectionKind::Knowledge => &mut self.knowledge,
        };
        *slot = text;
    }

    /// Present sections in scan order.
    pub fn present(&self) -> impl Iterator<Item = (SectionKind, &str)> + '_ {
        SectionKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|text| (kind, text)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// A parsed role definition. Built once per request and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleDocument {
    pub id: String,
    pub raw: String,
    pub sections: SectionMap,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

/// Which bundle bucket a reference protocol feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Thought,
    Execution,
    Knowledge,
}

impl DependencyKind {
    /// `None` for protocols the bundle does not collect (e.g. `tool`).
    pub fn from_protocol(protocol: &str) -> Option<Self> {
        match protocol {
            "thought" => Some(Self::Thought),
            "execution" => Some(Self::Execution),
            "knowledge" => Some(Self::Knowledge),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    pub content: String,
}

impl Dependency {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

/// Resolved dependencies partitioned by protocol. Only successful resolutions land here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyBundle {
    pub thoughts: Vec<Dependency>,
    pub executions: Vec<Dependency>,
    pub knowledges: Vec<Dependency>,
}

impl DependencyBundle {
    pub fn push(&mut self, kind: DependencyKind, dependency: Dependency) {
        match kind {
            DependencyKind::Thought => self.thoughts.push(dependency),
            DependencyKind::Execution => self.executions.push(dependency),
            DependencyKind::Knowledge => self.knowledges.push(dependency),
        }
    }

    pub fn len(&self) -> usize {
        self.thoughts.len() + self.executions.len() + self.knowledges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Existence of a role's persisted cognition network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CognitionStatus {
    pub has_network: bool,
    pub network_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CognitionStatus {
    pub fn present(path: PathBuf) -> Self {
        Self {
            has_network: true,
            network_path: Some(path),
            error: None,
        }
    }

    pub fn absent(path: PathBuf) -> Self {
        Self {
            has_network: false,
            network_path: Some(path),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            has_network: false,
            network_path: None,
            error: Some(error.into()),
        }
    }
}

/// Target framing for the assembled artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssemblyMode {
    #[default]
    Command,
    Subagent,
}

impl AssemblyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Subagent => "subagent",
        }
    }
}

impl std::fmt::Display for AssemblyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssemblyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "command" => Ok(Self::Command),
            "subagent" | "agent" => Ok(Self::Subagent),
            other => Err(format!("unknown assembly mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_map_present_follows_scan_order() {
        let mut sections = SectionMap::default();
        sections.set(SectionKind::Knowledge, Some("k".into()));
        sections.set(SectionKind::Personality, Some("p".into()));
        let kinds: Vec<_> = sections.present().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![SectionKind::Personality, SectionKind::Knowledge]);
        assert!(!sections.is_empty());
        assert!(SectionMap::default().is_empty());
    }

    #[test]
    fn dependency_kind_ignores_unknown_protocols() {
        assert_eq!(DependencyKind::from_protocol("thought"), Some(DependencyKind::Thought));
        assert_eq!(DependencyKind::from_protocol("tool"), None);
        assert_eq!(DependencyKind::from_protocol("role"), None);
    }

    #[test]
    fn assembly_mode_parses_aliases() {
        assert_eq!("command".parse::<AssemblyMode>(), Ok(AssemblyMode::Command));
        assert_eq!("Subagent".parse::<AssemblyMode>(), Ok(AssemblyMode::Subagent));
        assert_eq!("agent".parse::<AssemblyMode>(), Ok(AssemblyMode::Subagent));
        assert!("daemon".parse::<AssemblyMode>().is_err());
    }
}
