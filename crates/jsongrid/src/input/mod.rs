//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{
    DEFAULT_MAX_BYTE_SIZE, DEFAULT_MAX_NESTING_DEPTH, Parser, ParserConfig, parse,
};
pub use source::{FileSource, LocalFile, MemoryFile};
