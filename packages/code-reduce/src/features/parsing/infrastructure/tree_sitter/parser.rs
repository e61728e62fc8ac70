//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives. Converts a concrete tree
//! into the language-neutral domain tree, tagging nodes with their reduction
//! category from the plugin's kind table.

use tree_sitter::{Node as TSNode, Parser as TSParser, Tree};

use crate::errors::{ReduceError, Result};
use crate::features::parsing::domain::{ParseError, ParsedTree, SyntaxKind, SyntaxNode};
use crate::features::parsing::ports::{LanguagePlugin, SpanExt};
use crate::shared::models::Location;

/// Tree-sitter based parser for one language
pub struct TreeSitterParser<'p> {
    plugin: &'p dyn LanguagePlugin,
}

/// Traversal state for one conversion
struct ConvertContext<'s> {
    source: &'s str,
    /// Enclosing named fragments, outermost first
    scope_stack: Vec<String>,
}

impl<'s> ConvertContext<'s> {
    fn qualify(&self, name: &str) -> String {
        if self.scope_stack.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.scope_stack.join("."), name)
        }
    }
}

impl<'p> TreeSitterParser<'p> {
    pub fn new(plugin: &'p dyn LanguagePlugin) -> Self {
        Self { plugin }
    }

    pub fn language_name(&self) -> &'static str {
        self.plugin.language_id().name()
    }

    pub fn parse(&self, source: &str, file_path: &std::path::Path) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.plugin.tree_sitter_language())
            .map_err(|e| ReduceError::parse_error(format!("Failed to set language: {}", e)))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            ReduceError::parse_error(format!("Failed to parse {}", file_path.display()))
        })?;

        Ok(self.convert_tree(&tree, source, file_path))
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &std::path::Path) -> ParsedTree {
        let root_node = tree.root_node();
        let mut ctx = ConvertContext {
            source,
            scope_stack: Vec::new(),
        };
        let root = self.convert_node(&root_node, None, false, &mut ctx);

        let mut errors = Vec::new();
        self.collect_errors(&root_node, &mut errors);

        ParsedTree::new(root, file_path, self.language_name()).with_errors(errors)
    }

    /// Innermost non-wrapper node under a chain of wrappers
    fn unwrap_core<'t>(&self, node: &TSNode<'t>) -> TSNode<'t> {
        let table = self.plugin.kind_table();
        let mut core = *node;
        while table.is_wrapper(core.kind()) {
            match self.plugin.wrapped_child(&core) {
                Some(inner) => core = inner,
                None => break,
            }
        }
        core
    }

    /// Category and declared name of a node.
    ///
    /// A wrapper takes the category of the fragment it wraps; otherwise the
    /// position rule (statement container) applies to the wrapper itself.
    fn classify(&self, node: &TSNode, parent: Option<&TSNode>, source: &str) -> (SyntaxKind, Option<String>, bool) {
        let table = self.plugin.kind_table();
        let parent_kind = parent.map(|p| p.kind());

        if table.is_wrapper(node.kind()) {
            let core = self.unwrap_core(node);
            if let Some(kind) = table.intrinsic_kind(core.kind()) {
                let name = self.plugin.name_of(&core, source);
                return (kind, name, true);
            }
        }

        if !node.is_named() {
            return (SyntaxKind::Other(node.kind().to_string()), None, false);
        }

        let kind = table.classify(node.kind(), parent_kind);
        let name = if kind.is_scope() {
            self.plugin.name_of(node, source)
        } else {
            None
        };
        (kind, name, false)
    }

    /// Convert a tree-sitter node to SyntaxNode
    fn convert_node(
        &self,
        node: &TSNode,
        parent: Option<&TSNode>,
        absorbed: bool,
        ctx: &mut ConvertContext,
    ) -> SyntaxNode {
        let table = self.plugin.kind_table();

        let (kind, name, absorbs) = if absorbed {
            (SyntaxKind::Other(node.kind().to_string()), None, false)
        } else {
            self.classify(node, parent, ctx.source)
        };

        // The wrapped child (and any wrapper chain below it) loses its own category
        let absorbed_child = if absorbs || (absorbed && table.is_wrapper(node.kind())) {
            self.plugin.wrapped_child(node).map(|c| c.id())
        } else {
            None
        };

        let mut syntax = SyntaxNode::new(kind, node.to_span()).with_raw_kind(node.kind());
        let pushed = match name {
            Some(name) if syntax.kind.is_scope() => {
                let qualified = ctx.qualify(&name);
                syntax = syntax.with_name(name.clone(), qualified);
                ctx.scope_stack.push(name);
                true
            }
            _ => false,
        };

        let mut children = Vec::with_capacity(node.child_count());
        let mut pending_prefix: Option<Location> = None;
        for child in (0..node.child_count()).filter_map(|i| node.child(i)) {
            let child_absorbed = absorbed_child == Some(child.id());
            let mut converted = self.convert_node(&child, Some(node), child_absorbed, ctx);

            if table.is_attached_prefix(child.kind()) {
                pending_prefix.get_or_insert(converted.span.start());
            } else if converted.kind.is_reducible() && converted.kind != SyntaxKind::Comment {
                if let Some(start) = pending_prefix.take() {
                    converted.span = converted.span.with_start(start);
                }
            } else if child.is_named() && !table.is_comment(child.kind()) {
                pending_prefix = None;
            }

            children.push(converted);
        }

        if pushed {
            ctx.scope_stack.pop();
        }

        syntax.with_children(children)
    }

    /// Collect parse errors
    fn collect_errors(&self, node: &TSNode, errors: &mut Vec<ParseError>) {
        if node.is_error() || node.is_missing() {
            errors.push(ParseError {
                message: format!("Parse error at {:?}", node.kind()),
                span: node.to_span(),
            });
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_errors(&child, errors);
            }
        }
    }
}
