//! Expression parsing implementation
//!
//! Binary operators are parsed tier by tier from the table returned by
//! [`Precedence::tiers`](crate::parser::config::Precedence::tiers). Every tier
//! is left-associative. The bottom of the recursion is [`Parser::parse_factor`].
//!
//! # Grammar (default precedence)
//!
//! ```text
//! expr   ::= term (("+" | "-" | "&&" | "||") term)*
//! term   ::= factor (("*" | "/" | "<" | ">" | "<=" | ">=" | "==" | "!=") factor)*
//! factor ::= INT | FLOAT | STRING
//!          | "(" expr ")"
//!          | "[" element ("," element)* "]"
//!          | ("-" | "+" | "!") factor
//!          | IDENT ("++" | "--")?
//! element ::= INT | FLOAT | STRING | IDENT
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::config::ArrayPolicy;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, ParseWarning, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, tier: usize) -> Result<AstNode, ParseError> {
        let Some(operators) = self.config.precedence.tiers().get(tier) else {
            return self.parse_factor();
        };

        let mut left = self.parse_binary(tier + 1)?;
        while operators.contains(&self.peek_kind()) {
            let op = self.advance();
            let right = self.parse_binary(tier + 1)?;
            left = AstNode::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parse a single operand
    pub(crate) fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Int => Ok(AstNode::IntLiteral(self.advance())),
            TokenKind::Float => Ok(AstNode::FloatLiteral(self.advance())),
            TokenKind::String => Ok(AstNode::StringLiteral(self.advance())),
            TokenKind::LParen => self.nested(|p| {
                p.advance();
                let expr = p.parse_expression()?;
                p.consume(TokenKind::RParen)?;
                Ok(expr)
            }),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang => self.nested(|p| {
                let op = p.advance();
                let operand = p.parse_factor()?;
                Ok(AstNode::UnaryOp {
                    op,
                    operand: Box::new(operand),
                })
            }),
            TokenKind::Ident => {
                let target = self.advance();
                if self.check(TokenKind::PlusPlus) || self.check(TokenKind::MinusMinus) {
                    let op = self.advance();
                    Ok(AstNode::IncDec { target, op })
                } else {
                    Ok(AstNode::Identifier(target))
                }
            }
            _ => Err(ParseError::ExpectedExpression {
                found: self.peek().clone(),
                source_line: self.source_line(self.current_location()),
            }),
        }
    }

    /// Parse `[ element, ... ]`
    fn parse_array_literal(&mut self) -> Result<AstNode, ParseError> {
        let open = self.consume(TokenKind::LBracket)?;
        let mut elements = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Ident => {
                    elements.push(self.advance());
                }
                _ => return Err(self.unexpected("array element")),
            }
            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::RBracket)?;

        let array = match TokenArray::new(elements) {
            Ok(array) => array,
            Err(mixed) => match self.config.arrays {
                ArrayPolicy::Reject => {
                    return Err(ParseError::MixedArray {
                        source_line: self.source_line(mixed.found.location),
                        expected: mixed.expected,
                        found: mixed.found,
                    });
                }
                ArrayPolicy::WarnAndClear => {
                    self.warnings.push(ParseWarning {
                        message: format!(
                            "array elements must share one kind: expected {}, found {}; array cleared",
                            mixed.expected, mixed.found
                        ),
                        location: mixed.found.location,
                    });
                    TokenArray::default()
                }
            },
        };

        Ok(AstNode::ArrayLiteral {
            array,
            location: open.location,
        })
    }
}
