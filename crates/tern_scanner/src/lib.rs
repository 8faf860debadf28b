//! tern_scanner: tokenizer and trivia queries.
//!
//! The [`Scanner`] produces one token at a time and supports the rescans
//! and JSX/documentation modes the parser switches between.

pub mod char_codes;
pub mod comments;
pub mod scanner;

pub use comments::{leading_comment_ranges, trailing_comment_ranges, CommentRange};
pub use scanner::{ScanError, Scanner, ScannerState};
