//! Rolesmith Core - Types, reference grammar, and error handling

pub mod error;
pub mod reference;
pub mod types;

pub use error::{Error, Result};
pub use reference::*;
pub use types::*;
