//! A structural JSON parsing front end.
//!
//! [`Parser`] accepts an in-memory byte buffer, optionally runs a
//! [`Validate`] pass over it, drives the recursive [`Decode`] engine through
//! a per-call [`ParseContext`], and only reports success when every opened
//! object and array was closed exactly once. Failures are recorded as
//! position-anchored [`ParseError`]s in the parser's error sink.
//!
//! ```rust
//! use jsonfront::{DefaultConfig, ErrorKind, Parser, Value};
//!
//! let mut parser = Parser::new();
//! let value: Value = parser.parse::<Value, DefaultConfig>(br#"{"k":[1,2,3]}"#);
//! assert_eq!(value.to_string(), r#"{"k":[1,2,3]}"#);
//!
//! let mut target = Value::Null;
//! assert!(!parser.parse_into::<DefaultConfig, _>(&mut target, br#"{"a":1"#));
//! assert!(matches!(
//!     parser.errors()[0].kind,
//!     ErrorKind::ImbalancedObjectBraces(1)
//! ));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod context;
mod cursor;
mod decode;
mod error;
mod options;
mod parser;
mod scan;
mod validate;
mod value;

#[cfg(test)]
mod tests;

pub use context::{DEFAULT_MAX_DEPTH, ParseContext};
pub use cursor::Cursor;
pub use decode::{Decode, DecodeResult, Halt, Ignored, decode_array, decode_key, decode_object};
pub use error::{ErrorClass, ErrorKind, ParseError};
pub use options::{
    Config, DefaultConfig, Minified, ParseConfig, ParseOptions, Validated, ValidatedMinified,
};
pub use parser::Parser;
pub use validate::{Validate, Validator};
pub use value::{Array, Map, Value};
