//! # KODA text codec
//!
//! The textual surface is a relaxed superset of JSON: keys may be unquoted
//! identifiers, strings may use single quotes, `//` and nestable `/* */`
//! comments are skipped, commas and key colons are optional, and a document
//! may be a brace-less sequence of `key value` pairs (an implicit-root
//! object).
//!
//! # Example
//!
//! ```
//! use koda::text::{parse, stringify};
//!
//! let value = parse(b"{ a: 1, /* note */ b: [1, 2, 3,], }").unwrap();
//! assert_eq!(stringify(&value), b"{a:1 b:[1 2 3]}");
//! ```

pub mod lexer;
pub mod parser;
pub mod stringify;

pub use parser::{parse, parse_with_limits};
pub use stringify::stringify;
