//! Java Language Plugin
//!
//! Annotations live inside `modifiers`, so they go with their declaration.

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static JAVA_KINDS: KindTable = KindTable {
    subprograms: &["method_declaration", "constructor_declaration"],
    declarations: &[
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "annotation_type_declaration",
        "field_declaration",
    ],
    imports: &["import_declaration"],
    comments: &["line_comment", "block_comment"],
    statement_containers: &["block", "constructor_body"],
    wrappers: &[],
    attached_prefixes: &[],
};

/// Java language plugin
pub struct JavaPlugin;

impl JavaPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for JavaPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_java::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn kind_table(&self) -> &'static KindTable {
        &JAVA_KINDS
    }
}
