//! Tree-sitter based front-end implementation

mod frontend;
mod parser;

pub use frontend::TreeSitterFrontend;
pub use parser::TreeSitterParser;
