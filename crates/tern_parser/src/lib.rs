//! Error-tolerant, incremental parser for TypeScript and JavaScript.
//!
//! Every input produces a complete tree: syntax errors become diagnostics
//! and zero-width missing nodes, never a failed parse. After an edit,
//! [`update_source_file`] reparses only what the edit touched and splices
//! the untouched subtrees of the old tree into the new one.
//!
//! ```
//! use tern_parser::{parse_source_file, ParseOptions};
//!
//! let file = parse_source_file("main.ts", "let answer: number = 42;", ParseOptions::default());
//! assert_eq!(file.statements().len(), 1);
//! assert!(file.diagnostics.is_empty());
//! ```

mod context;
mod declaration;
mod entry;
mod expression;
mod incremental;
mod jsdoc;
mod jsx;
mod list;
mod module;
mod options;
mod parser;
mod precedence;
mod speculation;
mod statement;
mod types;

pub use entry::{
    parse_expression_fragment, parse_isolated_entity_name, parse_jsdoc_comment, parse_source_file,
    parse_source_file_with_scanner, parse_statement_fragment, parse_type_fragment, Fragment,
};
pub use incremental::{update_source_file, IncrementalError};
pub use options::{ParseOptions, SourceType};
pub use parser::Parser;

pub use tern_ast::{ScriptKind, SourceFile};
pub use tern_core::text::{TextChangeRange, TextSpan};
pub use tern_scanner::{leading_comment_ranges, trailing_comment_ranges, CommentRange};
