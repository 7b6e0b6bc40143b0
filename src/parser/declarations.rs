//! Declaration parsing implementation
//!
//! This module handles the statement-level rules of OML:
//!
//! - Local class groups: `local shapes = Circle, geo.Square;`
//! - Class declarations: `class Name : Base, Other { members }`
//! - Class members: variable declarations and method signatures
//! - Class names, simple and dot-qualified
//!
//! # Grammar
//!
//! ```text
//! local_var_dec_stmt    ::= "local" identifier "=" class_list ";"
//! class_list            ::= class_name ("," class_name)*
//! class_name            ::= identifier ("." class_name)?
//! class_dec_stmt        ::= "class" identifier (":" class_list)? "{" member* "}"
//! class_var_dec_stmt    ::= ("field" | "static" | "class_var") var_type var_name ("," var_name)* ";"
//! class_method_dec_stmt ::= "override"? method_kind var_type method_name "(" type_list ")" ";"
//! ```
//!
//! All parsing methods are implemented as methods on the [`Parser`] struct.

use crate::parser::node::{Category, Node};
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

/// Keywords that open a class variable declaration.
pub const VAR_DEC_KEYWORDS: [&str; 3] = ["field", "static", "class_var"];

/// Method kinds, optionally preceded by `override`.
pub const METHOD_KINDS: [&str; 4] = ["constructor", "method", "static_method", "class_method"];

impl Parser<'_> {
    /// Parse `local name = A, b.B;`
    pub fn parse_local_var_dec_stmt(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::LocalVarDecStmt);
        self.expect_keyword("local", &mut root)?;
        self.expect_identifier(&mut root)?;
        self.expect_symbol('=', &mut root)?;
        root.push(self.parse_class_list()?);
        self.expect_symbol(';', &mut root)?;
        Ok(root)
    }

    /// Parse a comma separated list of (possibly qualified) class names.
    pub fn parse_class_list(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassList);
        root.push(self.parse_class_name_qualified()?);
        while self.check_symbol(',') {
            self.expect_symbol(',', &mut root)?;
            root.push(self.parse_class_name_qualified()?);
        }
        Ok(root)
    }

    /// Parse a bare class name, as used when declaring a class.
    pub fn parse_class_name_simple(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassName);
        self.expect_identifier(&mut root)?;
        Ok(root)
    }

    /// Parse `a.b.C` into a right-leaning chain of `class_name` nodes, one
    /// per segment.
    pub fn parse_class_name_qualified(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassName);
        self.expect_identifier(&mut root)?;
        if self.check_symbol('.') {
            self.expect_symbol('.', &mut root)?;
            root.push(self.parse_class_name_qualified()?);
        }
        Ok(root)
    }

    pub fn parse_var_name(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::VarName);
        self.expect_identifier(&mut root)?;
        Ok(root)
    }

    pub fn parse_method_name(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::MethodName);
        self.expect_identifier(&mut root)?;
        Ok(root)
    }

    /// Parse a class declaration and all of its members.
    pub fn parse_class_dec_stmt(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassDecStmt);
        self.expect_keyword("class", &mut root)?;
        root.push(self.parse_class_name_simple()?);

        if self.check_symbol(':') {
            self.expect_symbol(':', &mut root)?;
            root.push(self.parse_class_list()?);
        }

        self.expect_symbol('{', &mut root)?;
        loop {
            if self.check_keyword_in(&VAR_DEC_KEYWORDS) {
                root.push(self.parse_class_var_dec_stmt()?);
            } else if self.starts_method_dec() {
                root.push(self.parse_class_method_dec_stmt()?);
            } else {
                break;
            }
        }
        self.expect_symbol('}', &mut root)?;

        trace!(members = root.children.len(), "parsed class declaration");
        Ok(root)
    }

    /// Parse `field int x, y;` and its `static` / `class_var` forms.
    pub fn parse_class_var_dec_stmt(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassVarDecStmt);
        self.expect_keyword_in(&VAR_DEC_KEYWORDS, &mut root)?;
        root.push(self.parse_var_type()?);
        root.push(self.parse_var_name()?);
        while self.check_symbol(',') {
            self.expect_symbol(',', &mut root)?;
            root.push(self.parse_var_name()?);
        }
        self.expect_symbol(';', &mut root)?;
        Ok(root)
    }

    /// Parse `override? method float getDistance(Point);`
    pub fn parse_class_method_dec_stmt(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::ClassMethodDecStmt);
        if self.check_keyword("override") {
            self.expect_keyword("override", &mut root)?;
        }
        self.expect_keyword_in(&METHOD_KINDS, &mut root)?;
        root.push(self.parse_var_type()?);
        root.push(self.parse_method_name()?);
        self.expect_symbol('(', &mut root)?;
        root.push(self.parse_type_list()?);
        self.expect_symbol(')', &mut root)?;
        self.expect_symbol(';', &mut root)?;
        Ok(root)
    }

    fn starts_method_dec(&self) -> bool {
        self.check_keyword("override") || self.check_keyword_in(&METHOD_KINDS)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::node::{Category, Node};
    use crate::parser::parse::{Expected, ParseError, Parser};
    use crate::parser::tables::LexicalTables;

    fn kw(s: &str) -> Node {
        Node::leaf(Category::Keyword, s)
    }

    fn id(s: &str) -> Node {
        Node::leaf(Category::Identifier, s)
    }

    fn sym(s: &str) -> Node {
        Node::leaf(Category::Symbol, s)
    }

    fn rule(category: Category, children: Vec<Node>) -> Node {
        Node::with_children(category, children)
    }

    fn class_name(s: &str) -> Node {
        rule(Category::ClassName, vec![id(s)])
    }

    #[test]
    fn test_parse_field_declaration() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("field int x, y;", &tables).unwrap();
        let stmt = parser.parse_class_var_dec_stmt().unwrap();

        let expected = rule(
            Category::ClassVarDecStmt,
            vec![
                kw("field"),
                rule(Category::VarType, vec![kw("int")]),
                rule(Category::VarName, vec![id("x")]),
                sym(","),
                rule(Category::VarName, vec![id("y")]),
                sym(";"),
            ],
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_parse_local_group() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("local class_group=B,geo.C;", &tables).unwrap();
        let stmt = parser.parse_local_var_dec_stmt().unwrap();

        let expected = rule(
            Category::LocalVarDecStmt,
            vec![
                kw("local"),
                id("class_group"),
                sym("="),
                rule(
                    Category::ClassList,
                    vec![
                        class_name("B"),
                        sym(","),
                        rule(
                            Category::ClassName,
                            vec![id("geo"), sym("."), class_name("C")],
                        ),
                    ],
                ),
                sym(";"),
            ],
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_parse_qualified_name_chain() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("a.b.C", &tables).unwrap();
        let name = parser.parse_class_name_qualified().unwrap();

        let expected = rule(
            Category::ClassName,
            vec![
                id("a"),
                sym("."),
                rule(
                    Category::ClassName,
                    vec![id("b"), sym("."), class_name("C")],
                ),
            ],
        );
        assert_eq!(name, expected);
    }

    #[test]
    fn test_parse_override_method() {
        let tables = LexicalTables::oml();
        let mut parser =
            Parser::from_source("override method bool contain(Point);", &tables).unwrap();
        let stmt = parser.parse_class_method_dec_stmt().unwrap();

        let expected = rule(
            Category::ClassMethodDecStmt,
            vec![
                kw("override"),
                kw("method"),
                rule(Category::VarType, vec![kw("bool")]),
                rule(Category::MethodName, vec![id("contain")]),
                sym("("),
                rule(
                    Category::TypeList,
                    vec![rule(Category::VarType, vec![class_name("Point")])],
                ),
                sym(")"),
                sym(";"),
            ],
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_parse_class_with_members() {
        let source = "class Polygon : Shape {\n\
                      field array<Point> points;\n\
                      constructor void Polygon(array<Point>);\n\
                      method float area();\n\
                      }";
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source(source, &tables).unwrap();
        let class = parser.parse_class_dec_stmt().unwrap();

        let kinds: Vec<Category> = class.children.iter().map(|c| c.category).collect();
        assert_eq!(
            kinds,
            vec![
                Category::Keyword,
                Category::ClassName,
                Category::Symbol,
                Category::ClassList,
                Category::Symbol,
                Category::ClassVarDecStmt,
                Category::ClassMethodDecStmt,
                Category::ClassMethodDecStmt,
                Category::Symbol,
            ]
        );
        assert_eq!(class.children.last(), Some(&sym("}")));
    }

    #[test]
    fn test_missing_closing_brace_is_fatal() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("class A {\n  field int x;\n", &tables).unwrap();
        let err = parser.parse_class_dec_stmt().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedEnd {
                expected: Expected::symbol('}')
            }
        );
    }

    #[test]
    fn test_committed_member_reports_true_error() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("class A { field int ; }", &tables).unwrap();
        let err = parser.parse_class_dec_stmt().unwrap_err();
        match err {
            ParseError::Unexpected {
                expected, lexeme, ..
            } => {
                assert_eq!(expected, Expected::identifier());
                assert_eq!(lexeme, ";");
            }
            other => panic!("Expected a mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_override_requires_method_kind() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("override int f();", &tables).unwrap();
        let err = parser.parse_class_method_dec_stmt().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { ref expected, ref lexeme, .. }
                if expected.lexemes.len() == 4 && lexeme == "int"
        ));
    }

    #[test]
    fn test_unknown_member_requires_closing_brace() {
        let tables = LexicalTables::oml();
        let mut parser = Parser::from_source("class A { local x = B; }", &tables).unwrap();
        let err = parser.parse_class_dec_stmt().unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { ref expected, ref lexeme, .. }
                if *expected == Expected::symbol('}') && lexeme == "local"
        ));
    }
}
