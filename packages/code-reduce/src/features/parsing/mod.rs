//! Parsing Feature
//!
//! Source front-end consumed by the reduction strategies: parses a file into a
//! language-neutral tree whose nodes are tagged with a reduction category, and
//! resolves subprograms to their declarations in companion files.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode, DeclarationLink
//! - `ports/` - Frontend trait, LanguagePlugin trait
//! - `infrastructure/` - TreeSitterParser, TreeSitterFrontend
//! - `plugins/` - Language kind tables (Python, Rust, Go, Java, TypeScript, Kotlin)

pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

// Re-exports
pub use domain::{DeclarationLink, ParsedTree, SyntaxKind, SyntaxNode};
pub use infrastructure::{TreeSitterFrontend, TreeSitterParser};
pub use plugins::create_full_registry;
pub use ports::{Frontend, KindTable, LanguageId, LanguagePlugin, LanguageRegistry, SpanExt};
