//! Tokeniser for OML source text
//!
//! Source is processed one line at a time. Each line has its comments
//! stripped, is split on single spaces into chunks, and every chunk is
//! resolved into [`Node`] terminals. Symbols may abut identifiers with no
//! separating space (`A:B,C{`), so a chunk that is not a keyword, identifier
//! or lone symbol is split around a symbol and both halves are resolved
//! in turn.
//!
//! Only the space character separates chunks. A tab inside a line is not a
//! separator: `field\tint` is one chunk and is rejected as unresolvable.
//! Leading and trailing whitespace of a line is trimmed.
//!
//! Block comments are only recognised within a single line: text from `/*`
//! or `*/` onward is dropped, and a line whose remainder starts with `*` is
//! skipped as a comment continuation. A `/* ... */` spanning lines whose
//! inner lines do not start with `*` is not supported.

use super::node::{Category, Node, SourceLocation};
use super::tables::LexicalTables;
use super::FrontendError;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A chunk contains no keyword, identifier or symbol it can be split into.
    #[error("Lexer error at {location}: unidentifiable token '{chunk}'")]
    UnresolvedChunk {
        chunk: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnresolvedChunk { location, .. } => *location,
        }
    }
}

/// Remove comments from a line.
///
/// Returns the code left on the line together with the number of characters
/// skipped before it, or `None` when the whole line is a block comment
/// continuation.
pub fn strip_comments(line: &str) -> Option<(usize, &str)> {
    let mut code = line;
    for marker in ["//", "/*", "*/"] {
        if let Some(idx) = code.find(marker) {
            code = &code[..idx];
        }
    }

    let trimmed = code.trim_start();
    let offset = code[..code.len() - trimmed.len()].chars().count();
    let trimmed = trimmed.trim_end();

    if trimmed.starts_with('*') {
        return None;
    }
    Some((offset, trimmed))
}

/// Identifier: a letter or underscore followed by letters, digits or
/// underscores. Unicode letters and digits are accepted.
pub fn is_identifier_shape(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// Tokeniser for OML source
pub struct Tokeniser<'t> {
    tables: &'t LexicalTables,
}

impl<'t> Tokeniser<'t> {
    pub fn new(tables: &'t LexicalTables) -> Self {
        Self { tables }
    }

    /// Tokenise a whole source text, line by line.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Node>, LexError> {
        let mut tokens = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            tokens.extend(self.tokenize_line(line, idx + 1)?);
        }
        debug!(count = tokens.len(), "tokenised source");
        Ok(tokens)
    }

    /// Read and tokenise a source file.
    pub fn tokenize_file(&self, path: &Path) -> Result<Vec<Node>, FrontendError> {
        let source = fs::read_to_string(path).map_err(|source| FrontendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.tokenize(&source)?)
    }

    /// Tokenise a single line. Comment-only and blank lines give no tokens.
    pub fn tokenize_line(
        &self,
        line: &str,
        line_number: usize,
    ) -> Result<Vec<Node>, LexError> {
        let mut tokens = Vec::new();
        let Some((offset, code)) = strip_comments(line) else {
            trace!(line = line_number, "skipped comment continuation");
            return Ok(tokens);
        };

        let mut column = offset + 1;
        for chunk in code.split(' ') {
            if !chunk.is_empty() {
                let loc = SourceLocation::new(line_number, column);
                self.resolve_chunk(chunk, loc, &mut tokens)?;
            }
            column += chunk.chars().count() + 1;
        }

        trace!(line = line_number, count = tokens.len(), "tokenised line");
        Ok(tokens)
    }

    /// Resolve one chunk into terminals, appending them to `out`.
    ///
    /// The text after each split symbol is handled by the loop. Only the
    /// text before it recurses, and that text holds none of the alphabet
    /// entries searched so far, so recursion depth is bounded by the size
    /// of the alphabet.
    fn resolve_chunk(
        &self,
        chunk: &str,
        loc: SourceLocation,
        out: &mut Vec<Node>,
    ) -> Result<(), LexError> {
        let mut rest = chunk;
        let mut loc = loc;
        // Alphabet entries before this index no longer occur in `rest`
        let mut alphabet_start = 0;

        loop {
            if rest.is_empty() {
                return Ok(());
            }

            if self.tables.is_keyword(rest) {
                out.push(Node::terminal(Category::Keyword, rest, loc));
                return Ok(());
            }

            if is_identifier_shape(rest) {
                out.push(Node::terminal(Category::Identifier, rest, loc));
                return Ok(());
            }

            if self.tables.is_symbol(rest) {
                out.push(Node::terminal(Category::Symbol, rest, loc));
                return Ok(());
            }

            let split = self
                .tables
                .first_symbol_from(rest, alphabet_start)
                .and_then(|(idx, sym)| {
                    rest.split_once(sym).map(|(pre, post)| (idx, pre, sym, post))
                });

            let Some((idx, prefix, symbol, suffix)) = split else {
                return Err(LexError::UnresolvedChunk {
                    chunk: rest.to_string(),
                    location: loc,
                });
            };

            let symbol_column = loc.column + prefix.chars().count();
            self.resolve_chunk(prefix, loc, out)?;
            out.push(Node::terminal(
                Category::Symbol,
                symbol.to_string(),
                SourceLocation::new(loc.line, symbol_column),
            ));

            rest = suffix;
            loc = SourceLocation::new(loc.line, symbol_column + 1);
            alphabet_start = idx;
        }
    }
}
