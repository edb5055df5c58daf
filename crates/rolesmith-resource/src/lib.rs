//! Rolesmith Resource: pluggable resource loading for role assembly
//!
//! Every pipeline stage reads through a `ResourceLoader` handed to it at
//! construction. Two backends ship here:
//! - `LocalFsLoader`: scans resource roots on disk once, then serves files
//! - `MemoryLoader`: fixed address→content map

pub mod loader;
pub mod local;
pub mod memory;

pub use loader::{LoadOutcome, ResourceAddress, ResourceLoader};
pub use local::LocalFsLoader;
pub use memory::MemoryLoader;
