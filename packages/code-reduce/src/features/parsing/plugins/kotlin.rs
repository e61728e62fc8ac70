//! Kotlin Language Plugin

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static KOTLIN_KINDS: KindTable = KindTable {
    subprograms: &["function_declaration", "secondary_constructor", "anonymous_initializer"],
    declarations: &["class_declaration", "object_declaration", "property_declaration", "type_alias"],
    imports: &["import_header"],
    comments: &["line_comment", "multiline_comment"],
    statement_containers: &["statements"],
    wrappers: &[],
    attached_prefixes: &[],
};

/// Kotlin language plugin
pub struct KotlinPlugin;

impl KotlinPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for KotlinPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_kotlin::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Kotlin
    }

    fn kind_table(&self) -> &'static KindTable {
        &KOTLIN_KINDS
    }
}
