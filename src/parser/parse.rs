//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor helpers, and the `program` entry point.
//!
//! # Parser Architecture
//!
//! The Parser is recursive descent over the flat token buffer produced by
//! the [`Tokeniser`]:
//! - This module: Parser struct, helper methods, and the `program` rule
//! - `declarations`: `local` groups, classes, class members and class names
//! - `types`: `var_type` and `type_list`
//!
//! # Dispatch
//!
//! Every alternation is decided by the next unconsumed token alone. Each
//! rule opens with an `expect_*` check that fails without consuming
//! anything; once a rule has consumed a token it is committed, and any later
//! mismatch is returned to the caller as-is. The cursor only moves forward.
//! A grammar change must keep the alternatives distinguishable by their
//! first token.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::lexer::{LexError, Tokeniser};
use crate::parser::node::{Category, Node, SourceLocation};
use crate::parser::tables::LexicalTables;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// What a grammar rule required at the point it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expected {
    pub category: Category,
    /// Acceptable lexemes; empty means any lexeme of `category`.
    pub lexemes: Vec<String>,
}

impl Expected {
    pub fn any(category: Category) -> Self {
        Self {
            category,
            lexemes: Vec::new(),
        }
    }

    pub fn identifier() -> Self {
        Self::any(Category::Identifier)
    }

    pub fn keyword(keyword: &str) -> Self {
        Self::keywords(&[keyword])
    }

    pub fn keywords(keywords: &[&str]) -> Self {
        Self {
            category: Category::Keyword,
            lexemes: keywords.iter().map(|kw| kw.to_string()).collect(),
        }
    }

    pub fn symbol(symbol: char) -> Self {
        Self {
            category: Category::Symbol,
            lexemes: vec![symbol.to_string()],
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexemes.as_slice() {
            [] => write!(f, "{}", self.category),
            [only] => write!(f, "{} '{}'", self.category, only),
            many => {
                let quoted: Vec<String> = many.iter().map(|l| format!("'{l}'")).collect();
                write!(f, "{} one of {}", self.category, quoted.join(", "))
            }
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The next token does not match what the rule requires.
    #[error("Parse error at {location}: expected {expected}, found {category} '{lexeme}'")]
    Unexpected {
        expected: Expected,
        category: Category,
        lexeme: String,
        location: SourceLocation,
    },

    /// The token stream ended where a token was required.
    #[error("Parse error: expected {expected}, found end of input")]
    UnexpectedEnd { expected: Expected },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Unexpected { location, .. } => Some(*location),
            ParseError::UnexpectedEnd { .. } => None,
            ParseError::Lex(err) => Some(err.location()),
        }
    }
}

/// Recursive descent parser for OML
pub struct Parser<'t> {
    pub(crate) tokens: Vec<Node>,
    pub(crate) position: usize,
    pub(crate) tables: &'t LexicalTables,
}

impl<'t> Parser<'t> {
    /// Create a parser over an already tokenised buffer.
    pub fn new(tokens: Vec<Node>, tables: &'t LexicalTables) -> Self {
        Self {
            tokens,
            position: 0,
            tables,
        }
    }

    /// Tokenise `source` eagerly and create a parser over the result.
    pub fn from_source(source: &str, tables: &'t LexicalTables) -> Result<Self, ParseError> {
        let tokens = Tokeniser::new(tables).tokenize(source)?;
        Ok(Self::new(tokens, tables))
    }

    /// Parse the entire token buffer into a `program` node.
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let mut program = Node::rule(Category::Program);

        loop {
            if self.check_keyword("local") {
                program.push(self.parse_local_var_dec_stmt()?);
            } else if self.check_keyword("class") {
                program.push(self.parse_class_dec_stmt()?);
            } else {
                break;
            }
        }

        if !self.is_at_end() {
            return Err(self.error(Expected::keywords(&["local", "class"])));
        }

        debug!(statements = program.children.len(), "parsed program");
        Ok(program)
    }

    /// Index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.position
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Node> {
        self.tokens.get(self.position)
    }

    pub(crate) fn check(&self, category: Category, lexeme: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.category == category && t.lexeme == lexeme)
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.check(Category::Keyword, keyword)
    }

    pub(crate) fn check_keyword_in(&self, keywords: &[&str]) -> bool {
        self.peek().is_some_and(|t| {
            t.category == Category::Keyword && keywords.contains(&t.lexeme.as_str())
        })
    }

    pub(crate) fn check_symbol(&self, symbol: char) -> bool {
        self.peek().is_some_and(|t| {
            t.category == Category::Symbol && t.lexeme.chars().eq(std::iter::once(symbol))
        })
    }

    pub(crate) fn check_identifier(&self) -> bool {
        self.peek().is_some_and(|t| t.category == Category::Identifier)
    }

    /// Consume the next token and append it to `parent`.
    pub(crate) fn advance_into(&mut self, parent: &mut Node) {
        if let Some(token) = self.tokens.get(self.position) {
            parent.push(token.clone());
            self.position += 1;
        }
    }

    /// Build the error for a mismatch at the current position.
    pub(crate) fn error(&self, expected: Expected) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::Unexpected {
                expected,
                category: token.category,
                lexeme: token.lexeme.clone(),
                location: token.location.unwrap_or_default(),
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    pub(crate) fn expect_keyword(
        &mut self,
        keyword: &str,
        parent: &mut Node,
    ) -> Result<(), ParseError> {
        if !self.check_keyword(keyword) {
            return Err(self.error(Expected::keyword(keyword)));
        }
        self.advance_into(parent);
        Ok(())
    }

    pub(crate) fn expect_keyword_in(
        &mut self,
        keywords: &[&str],
        parent: &mut Node,
    ) -> Result<(), ParseError> {
        if !self.check_keyword_in(keywords) {
            return Err(self.error(Expected::keywords(keywords)));
        }
        self.advance_into(parent);
        Ok(())
    }

    pub(crate) fn expect_symbol(
        &mut self,
        symbol: char,
        parent: &mut Node,
    ) -> Result<(), ParseError> {
        if !self.check_symbol(symbol) {
            return Err(self.error(Expected::symbol(symbol)));
        }
        self.advance_into(parent);
        Ok(())
    }

    pub(crate) fn expect_identifier(&mut self, parent: &mut Node) -> Result<(), ParseError> {
        if !self.check_identifier() {
            return Err(self.error(Expected::identifier()));
        }
        self.advance_into(parent);
        Ok(())
    }
}
