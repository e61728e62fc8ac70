//! Language Plugin Port
//!
//! Defines the contract for language-specific parsing plugins.
//! Each language (Python, Java, TypeScript, etc.) implements this trait.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tree_sitter::{Language as TSLanguage, Node as TSNode};

use crate::features::parsing::domain::SyntaxKind;
use crate::shared::models::Span;

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Python,
    Java,
    TypeScript,
    Tsx,
    JavaScript,
    Kotlin,
    Rust,
    Go,
}

impl LanguageId {
    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::Java => "java",
            LanguageId::TypeScript => "typescript",
            LanguageId::Tsx => "tsx",
            LanguageId::JavaScript => "javascript",
            LanguageId::Kotlin => "kotlin",
            LanguageId::Rust => "rust",
            LanguageId::Go => "go",
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(LanguageId::Python),
            "java" => Some(LanguageId::Java),
            "ts" | "mts" | "cts" => Some(LanguageId::TypeScript),
            "tsx" | "jsx" => Some(LanguageId::Tsx),
            "js" | "mjs" | "cjs" => Some(LanguageId::JavaScript),
            "kt" | "kts" => Some(LanguageId::Kotlin),
            "rs" => Some(LanguageId::Rust),
            "go" => Some(LanguageId::Go),
            _ => None,
        }
    }

    /// Get language from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Grammar node kinds that map onto reduction categories.
///
/// Kinds are tree-sitter node type names of one grammar.
#[derive(Debug, Clone, Copy)]
pub struct KindTable {
    pub subprograms: &'static [&'static str],
    pub declarations: &'static [&'static str],
    pub imports: &'static [&'static str],
    pub comments: &'static [&'static str],
    /// Every named, non-comment child of these nodes is a statement
    pub statement_containers: &'static [&'static str],
    /// Nodes that take over the category of the fragment they wrap
    pub wrappers: &'static [&'static str],
    /// Preceding siblings that belong to the next fragment (attributes)
    pub attached_prefixes: &'static [&'static str],
}

impl KindTable {
    pub fn is_wrapper(&self, kind: &str) -> bool {
        self.wrappers.contains(&kind)
    }

    pub fn is_attached_prefix(&self, kind: &str) -> bool {
        self.attached_prefixes.contains(&kind)
    }

    pub fn is_comment(&self, kind: &str) -> bool {
        self.comments.contains(&kind)
    }

    /// Category of a node from its own kind, ignoring its position
    pub fn intrinsic_kind(&self, kind: &str) -> Option<SyntaxKind> {
        if self.comments.contains(&kind) {
            Some(SyntaxKind::Comment)
        } else if self.imports.contains(&kind) {
            Some(SyntaxKind::Import)
        } else if self.subprograms.contains(&kind) {
            Some(SyntaxKind::Subprogram)
        } else if self.declarations.contains(&kind) {
            Some(SyntaxKind::Declaration)
        } else {
            None
        }
    }

    /// Category of a named node given its parent's kind
    pub fn classify(&self, kind: &str, parent_kind: Option<&str>) -> SyntaxKind {
        if let Some(intrinsic) = self.intrinsic_kind(kind) {
            return intrinsic;
        }
        let in_container = parent_kind
            .map(|p| self.statement_containers.contains(&p))
            .unwrap_or(false);
        let is_container = self.statement_containers.contains(&kind);
        if in_container && !is_container && !self.is_attached_prefix(kind) {
            SyntaxKind::Statement
        } else {
            SyntaxKind::Other(kind.to_string())
        }
    }
}

/// Language Plugin trait
///
/// Each supported language implements this trait to provide:
/// - Tree-sitter grammar
/// - Node kind table
/// - Companion declaration file lookup
pub trait LanguagePlugin: Send + Sync {
    /// Get the tree-sitter language
    fn tree_sitter_language(&self) -> TSLanguage;

    /// Get the language identifier
    fn language_id(&self) -> LanguageId;

    /// Node kinds for each reduction category
    fn kind_table(&self) -> &'static KindTable;

    /// File holding declarations for subprograms defined in `path`, if the
    /// language has such a convention (Python stubs, TypeScript `.d.ts`)
    fn companion_path(&self, path: &Path) -> Option<PathBuf> {
        let _ = path;
        None
    }

    /// Declared name of a fragment node
    fn name_of(&self, node: &TSNode, source: &str) -> Option<String> {
        let name_node = node.child_by_field_name("name").or_else(|| {
            (0..node.named_child_count())
                .filter_map(|i| node.named_child(i))
                .find(|c| {
                    matches!(
                        c.kind(),
                        "identifier" | "simple_identifier" | "type_identifier" | "field_identifier"
                    )
                })
        })?;
        source
            .get(name_node.byte_range())
            .map(str::to_string)
            .filter(|s| !s.is_empty())
    }

    /// Child that a wrapper node wraps
    fn wrapped_child<'a>(&self, node: &TSNode<'a>) -> Option<TSNode<'a>> {
        node.child_by_field_name("definition")
            .or_else(|| node.child_by_field_name("declaration"))
            .or_else(|| {
                (0..node.named_child_count())
                    .rev()
                    .filter_map(|i| node.named_child(i))
                    .find(|c| !self.kind_table().is_comment(c.kind()))
            })
    }
}

/// Plugin lookup by language
pub struct LanguageRegistry {
    plugins: HashMap<LanguageId, Box<dyn LanguagePlugin>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a language plugin
    pub fn register(&mut self, plugin: Box<dyn LanguagePlugin>) {
        self.plugins.insert(plugin.language_id(), plugin);
    }

    /// Get plugin by language ID
    pub fn get(&self, lang: LanguageId) -> Option<&dyn LanguagePlugin> {
        self.plugins.get(&lang).map(|p| p.as_ref())
    }

    /// Get plugin for a file path (by extension)
    pub fn for_path(&self, path: &Path) -> Option<&dyn LanguagePlugin> {
        self.get(LanguageId::from_path(path)?)
    }

    /// Check if any plugin supports the file
    pub fn supports(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper trait for extracting spans from tree-sitter nodes
pub trait SpanExt {
    fn to_span(&self) -> Span;
}

impl SpanExt for TSNode<'_> {
    fn to_span(&self) -> Span {
        Span::new(
            self.start_position().row as u32 + 1,
            self.start_position().column as u32,
            self.end_position().row as u32 + 1,
            self.end_position().column as u32,
        )
    }
}
