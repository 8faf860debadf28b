//! tern_core: Core utilities shared by every tern crate.
//!
//! Provides text positions, spans, change ranges, line maps and string
//! interning.

pub mod intern;
pub mod text;

// Re-export commonly used types
pub use intern::{InternedString, StringInterner};
pub use text::{ChangeRangeError, LineMap, TextChangeRange, TextPos, TextRange, TextSpan};
