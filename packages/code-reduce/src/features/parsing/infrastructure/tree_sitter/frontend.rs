//! Tree-sitter front-end
//!
//! Picks the language plugin from the file extension and resolves subprogram
//! declarations in the plugin's companion file.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use super::parser::TreeSitterParser;
use crate::errors::{ReduceError, Result};
use crate::features::parsing::domain::{DeclarationLink, ParsedTree, SyntaxKind, SyntaxNode};
use crate::features::parsing::plugins::create_full_registry;
use crate::features::parsing::ports::{Frontend, LanguagePlugin, LanguageRegistry};

pub struct TreeSitterFrontend {
    registry: LanguageRegistry,
}

impl TreeSitterFrontend {
    /// Front-end with every bundled language
    pub fn new() -> Self {
        Self::with_registry(create_full_registry())
    }

    pub fn with_registry(registry: LanguageRegistry) -> Self {
        Self { registry }
    }

    fn plugin_for(&self, path: &Path) -> Result<&dyn LanguagePlugin> {
        self.registry.for_path(path).ok_or_else(|| {
            ReduceError::parse_error(format!("no language plugin for {}", path.display()))
        })
    }
}

impl Default for TreeSitterFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for TreeSitterFrontend {
    fn parse(&self, path: &Path, source: &str) -> Result<ParsedTree> {
        let plugin = self.plugin_for(path)?;
        let tree = TreeSitterParser::new(plugin).parse(source, path)?;
        if tree.has_errors {
            debug!(
                "{}: {} syntax error node(s), reducing anyway",
                path.display(),
                tree.errors.len()
            );
        }
        Ok(tree)
    }

    fn supports(&self, path: &Path) -> bool {
        self.registry.supports(path)
    }

    fn resolve_declarations(&self, path: &Path, nodes: &[&SyntaxNode]) -> Vec<Option<DeclarationLink>> {
        let unresolved = vec![None; nodes.len()];

        let Some(companion) = self
            .registry
            .for_path(path)
            .and_then(|p| p.companion_path(path))
        else {
            return unresolved;
        };
        if !companion.exists() {
            debug!("no companion file {}", companion.display());
            return unresolved;
        }

        let declarations = match fs::read_to_string(&companion)
            .map_err(|e| ReduceError::io(&companion, e))
            .and_then(|source| self.parse(&companion, &source))
        {
            Ok(tree) => tree,
            Err(e) => {
                warn!("cannot resolve declarations in {}: {}", companion.display(), e);
                return unresolved;
            }
        };

        nodes
            .iter()
            .map(|node| {
                if node.kind != SyntaxKind::Subprogram {
                    return None;
                }
                let name = node.qualified_name.as_deref()?;
                declarations
                    .find_named(&SyntaxKind::Subprogram, name)
                    .map(|decl| DeclarationLink::new(&companion, decl.span))
            })
            .collect()
    }
}
