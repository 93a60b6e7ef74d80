//! An incremental, event-driven (SAX-style) JSON parser.
//!
//! Input arrives as byte chunks of any size through [`Parser::feed`]; the
//! parser validates it against RFC 8259 and calls the handlers registered on
//! its [`ParserBuilder`] once per grammar element, in document order. No
//! document tree is built. A literal split across chunks is resumed where it
//! stopped, and nesting depth is bounded only by memory.
//!
//! ```rust
//! use jsonsax::{Flow, Parser, Status};
//!
//! let mut names = Vec::new();
//! let mut parser = Parser::builder()
//!     .on_string(|s| {
//!         names.push(s.to_owned());
//!         Ok(Flow::from(names.len() < 2))
//!     })
//!     .build();
//!
//! assert_eq!(parser.feed(br#"["ada", "gra"#).unwrap(), Status::Ready);
//! assert_eq!(parser.feed(br#"ce", "alan"]"#).unwrap(), Status::Stopped);
//! drop(parser);
//! assert_eq!(names, ["ada", "grace"]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod builder;
mod cursor;
mod error;
mod event;
mod grammar;
mod handler;
mod lexer;
mod number;
mod options;
mod parser;
mod scratch;
mod writer;

#[cfg(test)]
mod tests;

pub use builder::ParserBuilder;
pub use cursor::Position;
pub use error::{ConfigError, ErrorKind, ErrorSource, LexicalError, ParserError, StructuralError};
pub use handler::{Flow, HandlerError, HandlerKind, HandlerResult, JsonHandler};
pub use lexer::TokenKind;
pub use number::{JsonNumber, NumberValue};
pub use options::{IntegerOverflow, ParserOptions};
pub use parser::{Parser, Status};
pub use writer::JsonWriter;
