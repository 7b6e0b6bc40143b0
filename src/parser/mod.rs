//! OML source code parser
//!
//! This module transforms OML source text into a parse tree:
//! - [`tables`]: Keywords, symbols and native type names
//! - [`lexer`]: Tokenisation (source text → terminal nodes)
//! - [`parse`]: Parsing (terminal nodes → `program` tree)
//! - [`node`]: The parse tree node shared by tokens and rule results
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one token of lookahead. Tokenisation
//! is eager: the whole buffer is built before parsing starts. Errors are
//! fail-fast; nothing attempts to resynchronise after a mismatch.

pub mod declarations;
pub mod lexer;
pub mod node;
pub mod parse;
pub mod tables;
pub mod types;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use lexer::{LexError, Tokeniser};
use node::Node;
use parse::{ParseError, Parser};
use tables::LexicalTables;

/// Any failure while turning a source file into a parse tree
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Tokenise and parse OML source text.
pub fn parse_source(source: &str) -> Result<Node, FrontendError> {
    let tables = LexicalTables::oml();
    let tokens = Tokeniser::new(&tables).tokenize(source)?;
    Ok(Parser::new(tokens, &tables).parse_program()?)
}

/// Read, tokenise and parse an OML file.
pub fn parse_file(path: &Path) -> Result<Node, FrontendError> {
    let tables = LexicalTables::oml();
    let tokens = Tokeniser::new(&tables).tokenize_file(path)?;
    Ok(Parser::new(tokens, &tables).parse_program()?)
}
