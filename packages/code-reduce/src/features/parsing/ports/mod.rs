//! Parsing ports (interfaces)

mod frontend;
mod language_plugin;

pub use frontend::Frontend;
pub use language_plugin::{KindTable, LanguageId, LanguagePlugin, LanguageRegistry, SpanExt};
