//! Common test utilities for code-reduce
//!
//! Scratch workspaces, source fixtures and file-inspecting oracles shared by
//! the integration tests.

#![allow(dead_code)]

mod fixtures;
mod workspace;

// Re-export all utilities
pub use fixtures::*;
pub use workspace::*;
