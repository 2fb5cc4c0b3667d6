// Syntax-level services on top of the parser
pub mod file;
pub mod formatter;

pub use file::SyntaxFile;
pub use formatter::{FormatOptions, format, format_source};

pub use crate::base::{Position, Span};
