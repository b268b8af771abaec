//! Statement parsing implementation
//!
//! This module handles parsing of all Rill statement types:
//!
//! - Variable declarations: `var x: int = 42;` (see `declarations`)
//! - Assignments: `x = 1;`, `x += 2;`
//! - Increment/decrement: `x++;`, `x--;`
//! - Control flow: `if`, `while`
//! - Function declarations (see `declarations`)
//! - Blocks: `{ ... }`
//! - Expression statements: `x + 1;`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= var_decl | func_decl | if_stmt | while_stmt | block
//!               | ident_stmt | expr ";"
//! ident_stmt  ::= IDENT assign_op expr ";"
//!               | IDENT ("++" | "--") ";"
//! assign_op   ::= "=" | "+=" | "-=" | "*=" | "/="
//! if_stmt     ::= "if" "(" expr ")" block
//! while_stmt  ::= "while" "(" expr ")" block
//! block       ::= "{" statement* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const ASSIGNMENT_OPERATORS: [TokenKind; 5] = [
    TokenKind::Eq,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
];

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Var | TokenKind::Const => self.parse_variable_declaration(),
            TokenKind::Func => self.parse_function_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::LBrace => Ok(AstNode::Block(self.parse_block()?)),
            TokenKind::Ident => self.parse_identifier_statement(),
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Bang => self.parse_expression_statement(),
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parse a statement that starts with an identifier
    fn parse_identifier_statement(&mut self) -> Result<AstNode, ParseError> {
        let next = self.peek_ahead(1).map(|t| t.kind);
        let after_next = self.peek_ahead(2).map(|t| t.kind);

        match next {
            Some(kind) if ASSIGNMENT_OPERATORS.contains(&kind) => self.parse_assignment(),
            Some(TokenKind::PlusPlus | TokenKind::MinusMinus)
                if after_next == Some(TokenKind::Semicolon) =>
            {
                let target = self.advance();
                let op = self.advance();
                self.consume(TokenKind::Semicolon)?;
                Ok(AstNode::IncDec { target, op })
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon)?;
        Ok(expr)
    }

    /// Parse `IDENT assign_op expr ;`
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let target = self.consume(TokenKind::Ident)?;
        let op = self.advance();
        let value = self.parse_expression()?;
        self.consume(TokenKind::Semicolon)?;

        Ok(AstNode::Assignment {
            target,
            op,
            value: Box::new(value),
        })
    }

    /// Parse `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.nested(|p| {
            let open = p.consume(TokenKind::LBrace)?;
            let mut statements = Vec::new();

            while !p.check(TokenKind::RBrace) && !p.is_at_end() {
                statements.push(p.parse_statement()?);
            }

            p.consume(TokenKind::RBrace)?;
            Ok(Block {
                statements,
                location: open.location,
            })
        })
    }

    /// Parse `( expr )` after `if` or `while`
    fn parse_condition(&mut self) -> Result<AstNode, ParseError> {
        self.consume(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen)?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.consume(TokenKind::If)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(AstNode::If {
            condition: Box::new(condition),
            body,
            location: keyword.location,
        })
    }

    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.consume(TokenKind::While)?;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(AstNode::While {
            condition: Box::new(condition),
            body,
            location: keyword.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::{parse_source, ParseError};

    fn single(source: &str) -> AstNode {
        let mut program = parse_source(source).unwrap();
        assert_eq!(program.nodes.len(), 1, "expected one statement in {source:?}");
        program.nodes.remove(0)
    }

    #[test]
    fn test_parse_assignment() {
        match single("x = 1;") {
            AstNode::Assignment { target, op, value } => {
                assert_eq!(target.text, "x");
                assert_eq!(op.kind, TokenKind::Eq);
                assert!(matches!(*value, AstNode::IntLiteral(_)));
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_compound_assignments() {
        for (source, kind) in [
            ("x += 1;", TokenKind::PlusEq),
            ("x -= 1;", TokenKind::MinusEq),
            ("x *= 1;", TokenKind::StarEq),
            ("x /= 1;", TokenKind::SlashEq),
        ] {
            match single(source) {
                AstNode::Assignment { op, .. } => assert_eq!(op.kind, kind),
                other => panic!("expected assignment, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_incdec_statement() {
        match single("count++;") {
            AstNode::IncDec { target, op } => {
                assert_eq!(target.text, "count");
                assert_eq!(op.kind, TokenKind::PlusPlus);
            }
            other => panic!("expected inc/dec, got {:?}", other),
        }
        assert!(matches!(single("count--;"), AstNode::IncDec { .. }));
    }

    #[test]
    fn test_parse_expression_statement() {
        assert!(matches!(single("x + 1;"), AstNode::BinaryOp { .. }));
        assert!(matches!(single("x;"), AstNode::Identifier(_)));
    }

    #[test]
    fn test_parse_if_statement() {
        match single("if (x < 10) { x = x + 1; }") {
            AstNode::If {
                condition,
                body,
                location,
            } => {
                assert!(matches!(*condition, AstNode::BinaryOp { .. }));
                assert_eq!(body.statements.len(), 1);
                assert_eq!(location, SourceLocation::new(1, 1));
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_with_empty_body() {
        match single("while (x) {}") {
            AstNode::While { body, .. } => assert!(body.statements.is_empty()),
            other => panic!("expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nested_blocks() {
        match single("{ { x = 1; } y = 2; }") {
            AstNode::Block(outer) => {
                assert_eq!(outer.statements.len(), 2);
                assert!(matches!(outer.statements[0], AstNode::Block(_)));
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon_after_incdec() {
        let err = parse_source("x++").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_source("while (x) { x = 1;").unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, found, .. } => {
                assert_eq!(expected, "'}'");
                assert!(found.is(TokenKind::Eof));
            }
            other => panic!("expected unexpected-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_cannot_start_with_operator() {
        let err = parse_source("; x = 1;").unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, .. } => assert_eq!(expected, "statement"),
            other => panic!("expected unexpected-token error, got {:?}", other),
        }
    }
}
