//! Rolesmith Pipeline: turns a role id into assembled role content
//!
//! Stages run strictly in order, each feeding the next:
//! 1. `RoleLoader`: fetch the role and split it into sections
//! 2. `DependencyAnalyzer`: resolve the references embedded in those sections
//! 3. `CognitionLoader`: check whether the role has a cognition network
//! 4. `assemble_content`: render cognition, role and state layers
//!
//! `ActionPipeline` wires the stages together around one shared loader.

pub mod assembler;
pub mod clean;
pub mod cognition;
pub mod dependency;
pub mod pipeline;
pub mod role;

pub use assembler::assemble_content;
pub use clean::clean_content;
pub use cognition::{CognitionLoader, FsProbe, PathProbe};
pub use dependency::DependencyAnalyzer;
pub use pipeline::{Activation, ActionPipeline};
pub use role::{parse_sections, RoleLoader};
