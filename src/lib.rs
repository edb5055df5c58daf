//! Rolesmith: assemble PromptX-style roles and install them into a host CLI tool

pub mod config;
pub mod install;
