//! Type parsing implementation
//!
//! ```text
//! var_type  ::= primitive
//!             | ("array" | "set") "<" var_type ">"
//!             | "map" "<" var_type "," var_type ">"
//!             | class_name
//! type_list ::= (var_type ("," var_type)*)?
//! ```
//!
//! Generic containers take the number of parameters recorded for them in
//! the [`LexicalTables`](crate::parser::tables::LexicalTables); each
//! parameter is a nested `var_type` node.

use crate::parser::node::{Category, Node};
use crate::parser::parse::{Expected, ParseError, Parser};

impl Parser<'_> {
    /// Parse a type: primitive keyword, generic container or class name.
    pub fn parse_var_type(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::VarType);

        let next = self.peek().map(|token| {
            (
                token.category,
                self.tables.is_primitive_type(&token.lexeme),
                self.tables.generic_arity(&token.lexeme),
            )
        });

        match next {
            Some((Category::Keyword, true, _)) => self.advance_into(&mut root),
            Some((Category::Keyword, _, Some(arity))) => {
                self.advance_into(&mut root);
                self.expect_symbol('<', &mut root)?;
                for idx in 0..arity {
                    if idx > 0 {
                        self.expect_symbol(',', &mut root)?;
                    }
                    root.push(self.parse_var_type()?);
                }
                self.expect_symbol('>', &mut root)?;
            }
            Some((Category::Identifier, _, _)) => root.push(self.parse_class_name_qualified()?),
            _ => return Err(self.error(Expected::any(Category::VarType))),
        }

        Ok(root)
    }

    /// Parse the parameter types of a method signature; may be empty.
    pub fn parse_type_list(&mut self) -> Result<Node, ParseError> {
        let mut root = Node::rule(Category::TypeList);
        if !self.starts_var_type() {
            return Ok(root);
        }

        root.push(self.parse_var_type()?);
        while self.check_symbol(',') {
            self.expect_symbol(',', &mut root)?;
            root.push(self.parse_var_type()?);
        }
        Ok(root)
    }

    fn starts_var_type(&self) -> bool {
        self.peek().is_some_and(|token| match token.category {
            Category::Identifier => true,
            Category::Keyword => self.tables.is_native_type(&token.lexeme),
            _ => false,
        })
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

    fn sym(s: &str) -> Node {
        Node::leaf(Category::Symbol, s)
    }

    fn var_type(children: Vec<Node>) -> Node {
        Node::with_children(Category::VarType, children)
    }

    fn parse_type(source: &str) -> Result<Node, ParseError> {
        let tables = LexicalTables::oml();
        Parser::from_source(source, &tables)?.parse_var_type()
    }

    #[test]
    fn test_primitive_type() {
        assert_eq!(parse_type("duck").unwrap(), var_type(vec![kw("duck")]));
    }

    #[test]
    fn test_nested_generic_type() {
        let parsed = parse_type("map<array<int>,bool>").unwrap();

        let expected = var_type(vec![
            kw("map"),
            sym("<"),
            var_type(vec![
                kw("array"),
                sym("<"),
                var_type(vec![kw("int")]),
                sym(">"),
            ]),
            sym(","),
            var_type(vec![kw("bool")]),
            sym(">"),
        ]);
        assert_eq!(parsed, expected);

        // Spacing does not change the tree
        assert_eq!(parse_type("map < array < int > , bool >").unwrap(), expected);
    }

    #[test]
    fn test_class_type() {
        let parsed = parse_type("set<geo.Point>").unwrap();
        let point = Node::with_children(
            Category::ClassName,
            vec![Node::leaf(Category::Identifier, "Point")],
        );
        let qualified = Node::with_children(
            Category::ClassName,
            vec![Node::leaf(Category::Identifier, "geo"), sym("."), point],
        );
        assert_eq!(
            parsed,
            var_type(vec![kw("set"), sym("<"), var_type(vec![qualified]), sym(">")])
        );
    }

    #[test]
    fn test_map_requires_two_parameters() {
        let err = parse_type("map<int>").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { ref expected, ref lexeme, .. }
                if *expected == Expected::symbol(',') && lexeme == ">"
        ));
    }

    #[test]
    fn test_non_type_keyword() {
        let err = parse_type("class").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Unexpected { ref expected, .. }
                if *expected == Expected::any(Category::VarType)
        ));
    }

    #[test]
    fn test_type_list() {
        let tables = LexicalTables::oml();

        let mut parser = Parser::from_source(")", &tables).unwrap();
        let empty = parser.parse_type_list().unwrap();
        assert!(empty.children.is_empty());
        assert_eq!(parser.position(), 0);

        let mut parser = Parser::from_source("int, Point, map<str,float>)", &tables).unwrap();
        let list = parser.parse_type_list().unwrap();
        let kinds: Vec<Category> = list.children.iter().map(|c| c.category).collect();
        assert_eq!(
            kinds,
            vec![
                Category::VarType,
                Category::Symbol,
                Category::VarType,
                Category::Symbol,
                Category::VarType,
            ]
        );
        assert!(parser.check_symbol(')'));
    }
}
