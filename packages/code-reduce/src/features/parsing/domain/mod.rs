//! Parsing domain models

mod declaration;
mod parsed_tree;
mod syntax_node;

pub use declaration::DeclarationLink;
pub use parsed_tree::{ParseError, ParsedTree};
pub use syntax_node::{SyntaxKind, SyntaxNode};
