//! TypeScript / JavaScript Language Plugin
//!
//! One plugin type serves `.ts`, `.tsx` and plain JavaScript; `.ts` modules
//! link their functions to the sibling `.d.ts` declaration file.

use std::path::{Path, PathBuf};

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static TYPESCRIPT_KINDS: KindTable = KindTable {
    subprograms: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
        "function_signature",
        "method_signature",
    ],
    declarations: &[
        "class_declaration",
        "abstract_class_declaration",
        "interface_declaration",
        "type_alias_declaration",
        "enum_declaration",
        "public_field_definition",
    ],
    imports: &["import_statement"],
    comments: &["comment"],
    statement_containers: &["program", "statement_block"],
    wrappers: &["export_statement", "ambient_declaration"],
    attached_prefixes: &["decorator"],
};

/// TypeScript language plugin
pub struct TypeScriptPlugin {
    id: LanguageId,
}

impl TypeScriptPlugin {
    pub fn typescript() -> Self {
        Self {
            id: LanguageId::TypeScript,
        }
    }

    pub fn tsx() -> Self {
        Self { id: LanguageId::Tsx }
    }

    pub fn javascript() -> Self {
        Self {
            id: LanguageId::JavaScript,
        }
    }
}

impl LanguagePlugin for TypeScriptPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        match self.id {
            LanguageId::Tsx => tree_sitter_typescript::language_tsx(),
            _ => tree_sitter_typescript::language_typescript(),
        }
    }

    fn language_id(&self) -> LanguageId {
        self.id
    }

    fn kind_table(&self) -> &'static KindTable {
        &TYPESCRIPT_KINDS
    }

    fn companion_path(&self, path: &Path) -> Option<PathBuf> {
        if self.id != LanguageId::TypeScript {
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(".ts")?;
        if stem.ends_with(".d") {
            return None;
        }
        Some(path.with_file_name(format!("{}.d.ts", stem)))
    }
}
