//! Go Language Plugin

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static GO_KINDS: KindTable = KindTable {
    subprograms: &["function_declaration", "method_declaration"],
    declarations: &["type_declaration", "const_declaration", "var_declaration"],
    imports: &["import_declaration", "import_spec"],
    comments: &["comment"],
    statement_containers: &["block", "statement_list"],
    wrappers: &[],
    attached_prefixes: &[],
};

/// Go language plugin
pub struct GoPlugin;

impl GoPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for GoPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_go::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Go
    }

    fn kind_table(&self) -> &'static KindTable {
        &GO_KINDS
    }
}
