//! Parse tree node definitions
//!
//! OML uses one node type for both terminals (tokens) and grammar-rule
//! results. A terminal carries the exact source text it was built from; a
//! rule node carries only its [`Category`] and its ordered children.
//!
//! Equality is structural: two nodes are equal when their categories,
//! lexemes and children match recursively. Source locations are diagnostic
//! metadata and never take part in comparisons, so a tree built from
//! `class A:B{` equals one built from `class A : B {`.

use std::fmt;

/// Source location information for error reporting (1-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Terminal kinds and grammar-rule names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    // Terminals
    Keyword,
    Identifier,
    Symbol,

    // Grammar rules
    Program,
    ClassDecStmt,
    VarType,
    ClassList,
    ClassVarDecStmt,
    ClassMethodDecStmt,
    TypeList,
    LocalVarDecStmt,
    ClassName,
    VarName,
    MethodName,
}

impl Category {
    /// The snake_case tag used when rendering trees.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Keyword => "keyword",
            Category::Identifier => "identifier",
            Category::Symbol => "symbol",
            Category::Program => "program",
            Category::ClassDecStmt => "class_dec_stmt",
            Category::VarType => "var_type",
            Category::ClassList => "class_list",
            Category::ClassVarDecStmt => "class_var_dec_stmt",
            Category::ClassMethodDecStmt => "class_method_dec_stmt",
            Category::TypeList => "type_list",
            Category::LocalVarDecStmt => "local_var_dec_stmt",
            Category::ClassName => "class_name",
            Category::VarName => "var_name",
            Category::MethodName => "method_name",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Category::Keyword | Category::Identifier | Category::Symbol
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse tree node: a terminal token or the result of a grammar rule
#[derive(Debug, Clone)]
pub struct Node {
    pub category: Category,
    /// Source text; empty on rule nodes.
    pub lexeme: String,
    pub children: Vec<Node>,
    /// Where a terminal starts. `None` on rule nodes.
    pub location: Option<SourceLocation>,
}

impl Node {
    /// Create a terminal built from `lexeme` at `location`.
    pub fn terminal(
        category: Category,
        lexeme: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            category,
            lexeme: lexeme.into(),
            children: Vec::new(),
            location: Some(location),
        }
    }

    /// Create an empty rule node, populated by the rule that owns it.
    pub fn rule(category: Category) -> Self {
        Self {
            category,
            lexeme: String::new(),
            children: Vec::new(),
            location: None,
        }
    }

    /// Terminal without a location, for building expected trees in tests.
    pub fn leaf(category: Category, lexeme: impl Into<String>) -> Self {
        Self {
            category,
            lexeme: lexeme.into(),
            children: Vec::new(),
            location: None,
        }
    }

    /// Rule node with the given children, for building expected trees.
    pub fn with_children(category: Category, children: Vec<Node>) -> Self {
        Self {
            category,
            lexeme: String::new(),
            children,
            location: None,
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All terminals under this node, left to right.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.category.is_terminal() {
            out.push(self);
            return;
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if self.is_leaf() {
            if self.lexeme.is_empty() {
                return writeln!(f, "{}", self.category);
            }
            return writeln!(f, "{} {}", self.category, self.lexeme);
        }

        writeln!(f, "{}", self.category)?;
        let indent = "  │ ".repeat(depth);
        for child in &self.children {
            write!(f, "{indent}  └ ")?;
            child.render(f, depth + 1)?;
        }
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.lexeme == other.lexeme
            && self.children == other.children
    }
}

impl Eq for Node {}

/// Indented tree for diagnostics. Each child of a rule node sits on its own
/// line behind one `"  │ "` guide per depth level and a `"  └ "` connector;
/// leaves print as `<category> <lexeme>`. No blank separator line follows a
/// rule node's children, and the format is not meant to be parsed back.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}
