//! # lockstep_parser
//!
//! Builds a [`lockstep_ast::Tree`] from source text.
//!
//! The grammar is a JavaScript-like scripting subset covering everything
//! the comparator distinguishes: declarations, control flow, function
//! declarations, assignment and binary expressions, calls and member
//! access, and the literal kinds (number, string, boolean, null, regex,
//! array, object with `get`/`set` accessors).
//!
//! Parsing is fallible and returns [`ParseError`]; the caller decides
//! whether a failure aborts the run.

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::Token;
pub use parser::{ParsedProgram, parse_file, parse_str};
