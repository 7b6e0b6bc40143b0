//! Lexical tables for OML
//!
//! Keywords, the symbol alphabet and the native type names are fixed
//! configuration. A [`LexicalTables`] value is built once and borrowed by the
//! [`Tokeniser`](super::lexer::Tokeniser) and [`Parser`](super::parse::Parser);
//! nothing here is mutated after construction, so one value can back any
//! number of concurrent parses.

use rustc_hash::FxHashSet;

/// Every reserved word of the language.
pub const KEYWORDS: [&str; 21] = [
    "class",
    "local",
    "int",
    "float",
    "double",
    "char",
    "str",
    "bool",
    "duck",
    "void",
    "array",
    "set",
    "map",
    "field",
    "static",
    "class_var",
    "override",
    "constructor",
    "method",
    "static_method",
    "class_method",
];

/// Single-character symbols, in the order chunk splitting searches them.
pub const SYMBOLS: [char; 11] = ['<', '>', '(', ')', '{', '}', ',', ';', ':', '.', '='];

/// Keywords that name a built-in type (scalars and generic containers).
pub const NATIVE_TYPES: [&str; 11] = [
    "int", "float", "double", "char", "str", "bool", "duck", "void", "array", "set", "map",
];

/// Generic containers and the number of type parameters each takes.
pub const GENERIC_TYPES: [(&str, usize); 3] = [("array", 1), ("set", 1), ("map", 2)];

/// Read-only lookup tables shared by the tokeniser and the parser.
#[derive(Debug, Clone)]
pub struct LexicalTables {
    keywords: FxHashSet<&'static str>,
    longest_keyword: usize,
    symbols: Vec<char>,
    native_types: FxHashSet<&'static str>,
    generic_types: Vec<(&'static str, usize)>,
}

impl LexicalTables {
    /// Tables for the OML language.
    pub fn oml() -> Self {
        Self {
            keywords: KEYWORDS.iter().copied().collect(),
            longest_keyword: KEYWORDS.iter().map(|kw| kw.len()).max().unwrap_or(0),
            symbols: SYMBOLS.to_vec(),
            native_types: NATIVE_TYPES.iter().copied().collect(),
            generic_types: GENERIC_TYPES.to_vec(),
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        word.len() <= self.longest_keyword && self.keywords.contains(word)
    }

    /// True if `word` is exactly one symbol character.
    pub fn is_symbol(&self, word: &str) -> bool {
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.symbols.contains(&ch),
            _ => false,
        }
    }

    /// Returns the first symbol of the alphabet that occurs anywhere in
    /// `chunk`. Alphabet order wins over position in the chunk.
    pub fn first_symbol_in(&self, chunk: &str) -> Option<char> {
        self.first_symbol_from(chunk, 0).map(|(_, sym)| sym)
    }

    /// Like [`first_symbol_in`](Self::first_symbol_in), skipping the first
    /// `start` alphabet entries. Returns the alphabet index with the symbol.
    pub fn first_symbol_from(&self, chunk: &str, start: usize) -> Option<(usize, char)> {
        self.symbols
            .iter()
            .copied()
            .enumerate()
            .skip(start)
            .find(|&(_, sym)| chunk.contains(sym))
    }

    pub fn is_native_type(&self, word: &str) -> bool {
        self.native_types.contains(word)
    }

    /// A native type that takes no type parameters (`int`, `bool`, ...).
    pub fn is_primitive_type(&self, word: &str) -> bool {
        self.is_native_type(word) && self.generic_arity(word).is_none()
    }

    /// Number of type parameters for a generic container keyword.
    pub fn generic_arity(&self, word: &str) -> Option<usize> {
        self.generic_types
            .iter()
            .find(|(name, _)| *name == word)
            .map(|&(_, arity)| arity)
    }
}
