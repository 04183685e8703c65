//! Block-level scanner for the Markdown dialect.
//!
//! The scanner walks the input with one forward cursor and recognizes:
//! - Fenced code blocks
//! - Collapsible start/end markers
//! - ATX headings
//! - Horizontal rules
//! - Blockquotes
//! - Lists (one level)
//! - Paragraphs
//!
//! Each block's text payload is handed to the inline parser as soon as the
//! block is complete; code block content never is.

mod node;
mod scanner;

pub use node::{Block, ListItem};
pub use scanner::{BlockScanner, scan};
