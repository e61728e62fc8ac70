//! Rust Language Plugin
//!
//! Outer attributes (`#[...]`) are attached to the item that follows them.

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static RUST_KINDS: KindTable = KindTable {
    subprograms: &["function_item"],
    declarations: &[
        "struct_item",
        "enum_item",
        "union_item",
        "trait_item",
        "impl_item",
        "type_item",
        "const_item",
        "static_item",
        "mod_item",
        "macro_definition",
    ],
    imports: &["use_declaration", "extern_crate_declaration"],
    comments: &["line_comment", "block_comment"],
    statement_containers: &["block"],
    wrappers: &[],
    attached_prefixes: &["attribute_item"],
};

/// Rust language plugin
pub struct RustPlugin;

impl RustPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for RustPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_rust::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Rust
    }

    fn kind_table(&self) -> &'static KindTable {
        &RUST_KINDS
    }
}
