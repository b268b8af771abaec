//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Variables and constants: `var x: int;`, `const pi: float = 3.14;`
//! - Functions: `func add(a: int, b: int) -> int { ... }`
//! - Function parameters
//!
//! # Grammar
//!
//! ```text
//! var_decl    ::= ("var" | "const") declarator ("=" expr)? ";"
//! declarator  ::= IDENT ":" TYPE
//! func_decl   ::= "func" IDENT "(" params? ")" "->" TYPE block
//! params      ::= param ("," param)*
//! param       ::= ("var" | "const")? declarator
//! ```
//!
//! `void` is accepted as a return type only. A variable or parameter declared
//! `void` is rejected.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a `var` or `const` declaration
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.advance();
        let mut decl = self.parse_declarator(Some(keyword))?;

        if self.match_token(TokenKind::Eq) {
            decl.init = Some(Box::new(self.parse_expression()?));
        }

        self.consume(TokenKind::Semicolon)?;
        Ok(AstNode::VarDecl(decl))
    }

    /// Parse `IDENT : TYPE`
    fn parse_declarator(&mut self, keyword: Option<Token>) -> Result<VarDecl, ParseError> {
        let name = self.consume(TokenKind::Ident)?;
        self.consume(TokenKind::Colon)?;
        let var_type = self.consume(TokenKind::VariableType)?;

        if var_type.text == "void" {
            return Err(ParseError::VoidVariable {
                source_line: self.source_line(name.location),
                name,
            });
        }

        let location = keyword.as_ref().map_or(name.location, |k| k.location);
        Ok(VarDecl {
            keyword,
            name,
            var_type,
            init: None,
            location,
        })
    }

    /// Parse `func IDENT ( params ) -> TYPE block`
    pub(crate) fn parse_function_declaration(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.consume(TokenKind::Func)?;
        let name = self.consume(TokenKind::Ident)?;
        let params = self.parse_parameter_list()?;
        self.consume(TokenKind::Arrow)?;
        let return_type = self.consume(TokenKind::VariableType)?;
        let body = self.parse_block()?;

        Ok(AstNode::FunctionDecl {
            name,
            params,
            return_type,
            body,
            location: keyword.location,
        })
    }

    fn parse_parameter_list(&mut self) -> Result<ParameterList, ParseError> {
        let open = self.consume(TokenKind::LParen)?;
        let mut params = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                let keyword = if self.check(TokenKind::Var) || self.check(TokenKind::Const) {
                    Some(self.advance())
                } else {
                    None
                };
                params.push(self.parse_declarator(keyword)?);

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen)?;
        Ok(ParameterList {
            params,
            location: open.location,
        })
    }
}
