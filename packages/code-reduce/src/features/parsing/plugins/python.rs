//! Python Language Plugin
//!
//! Decorators are covered through `decorated_definition`; subprograms link to
//! their declaration in the sibling `.pyi` stub.

use std::path::{Path, PathBuf};

use tree_sitter::Language as TSLanguage;

use crate::features::parsing::ports::{KindTable, LanguageId, LanguagePlugin};

static PYTHON_KINDS: KindTable = KindTable {
    subprograms: &["function_definition"],
    declarations: &["class_definition", "type_alias_statement"],
    imports: &["import_statement", "import_from_statement", "future_import_statement"],
    comments: &["comment"],
    statement_containers: &["module", "block"],
    wrappers: &["decorated_definition"],
    attached_prefixes: &[],
};

/// Python language plugin
pub struct PythonPlugin;

impl PythonPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for PythonPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_python::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn kind_table(&self) -> &'static KindTable {
        &PYTHON_KINDS
    }

    fn companion_path(&self, path: &Path) -> Option<PathBuf> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Some(path.with_extension("pyi")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_is_stub() {
        let plugin = PythonPlugin::new();
        assert_eq!(
            plugin.companion_path(Path::new("pkg/mod.py")),
            Some(PathBuf::from("pkg/mod.pyi"))
        );
        assert_eq!(plugin.companion_path(Path::new("pkg/mod.pyi")), None);
    }
}
