//! # Introduction
//!
//! `omlc` is the front end for OML, a small textual language for modelling
//! classes: their supertypes, fields, method signatures and named groups of
//! class references. It turns source text into a parse tree for later
//! semantic analysis or code generation.
//!
//! ## Pipeline
//!
//! ```text
//! Path → Source discovery → Tokeniser → Parser → Parse tree
//! ```
//!
//! 1. [`source`] — finds `.oml` files for a file or directory path.
//! 2. [`parser::lexer`] — strips comments and splits each line into
//!    keyword, identifier and symbol terminals, even where symbols abut
//!    words (`A:B,C{`).
//! 3. [`parser::parse`] — recursive descent over the token buffer, producing
//!    a [`parser::node::Node`] tree rooted at `program`.
//!
//! ## Language
//!
//! ```text
//! // a named group of classes
//! local shapes = Circle, geo.Square;
//!
//! class Circle : Shape {
//!     field float radius;
//!     static map<str, array<Circle>> registry;
//!     constructor void Circle(float);
//!     override method float area();
//! }
//! ```
//!
//! Semantic checks (types, duplicates, scopes) are not performed here.

pub mod parser;
pub mod source;

pub use parser::{parse_file, parse_source, FrontendError};
