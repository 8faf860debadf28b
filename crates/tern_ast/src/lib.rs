//! tern_ast: concrete syntax tree definitions.
//!
//! Nodes live in a [`NodeArena`] and refer to each other by index. This
//! crate defines the `SyntaxKind` enum, flag types, the arena, typed views
//! over nodes and the [`SourceFile`] parse result.

pub mod generated;
pub mod node;
pub mod source_file;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use node::{ArenaMark, ListFlags, ListId, Node, NodeArena, NodeId, NodeList, Slot};
pub use source_file::SourceFile;
pub use syntax_kind::SyntaxKind;
pub use types::*;
