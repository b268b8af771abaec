//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable, parameter and function declarations
//! - `statements`: statement dispatch, blocks, `if` and `while`
//! - `expressions`: binary tiers, factors and array literals
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! There is no error recovery: the first syntax error aborts the parse and no
//! partial [`Program`] is returned.

use crate::constants::MAX_NESTING_DEPTH;
use crate::parser::ast::*;
use crate::parser::config::ParserConfig;
use crate::parser::lexer::{write_snippet, LexError, Lexer, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The source could not be tokenized
    Lex(LexError),

    /// The token sequence held nothing but the end-of-input marker
    EmptyInput,

    /// The current token does not fit the grammar at this point
    UnexpectedToken {
        expected: String,
        found: Token,
        source_line: String,
    },

    /// An operand was required but the current token cannot start one
    ExpectedExpression { found: Token, source_line: String },

    /// `var x: void` and friends
    VoidVariable { name: Token, source_line: String },

    /// Array literal elements of different kinds
    MixedArray {
        expected: TokenKind,
        found: Token,
        source_line: String,
    },

    /// Parentheses, unary prefixes or blocks nested past [`MAX_NESTING_DEPTH`]
    TooDeep { found: Token, source_line: String },
}

impl ParseError {
    /// Location of the offending character or token, if any
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            ParseError::Lex(err) => Some(err.location),
            ParseError::EmptyInput => None,
            ParseError::UnexpectedToken { found, .. }
            | ParseError::ExpectedExpression { found, .. }
            | ParseError::MixedArray { found, .. }
            | ParseError::TooDeep { found, .. } => Some(found.location),
            ParseError::VoidVariable { name, .. } => Some(name.location),
        }
    }

    fn source_line(&self) -> &str {
        match self {
            ParseError::Lex(err) => &err.source_line,
            ParseError::EmptyInput => "",
            ParseError::UnexpectedToken { source_line, .. }
            | ParseError::ExpectedExpression { source_line, .. }
            | ParseError::VoidVariable { source_line, .. }
            | ParseError::MixedArray { source_line, .. }
            | ParseError::TooDeep { source_line, .. } => source_line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseError::Lex(err) => return write!(f, "{}", err),
            ParseError::EmptyInput => return write!(f, "Syntax error: nothing to parse"),
            ParseError::UnexpectedToken {
                expected, found, ..
            } => format!("expected {}, found {}", expected, found),
            ParseError::ExpectedExpression { found, .. } => {
                format!("expected expression, found {}", found)
            }
            ParseError::VoidVariable { name, .. } => {
                format!("variable '{}' cannot be declared 'void'", name.text)
            }
            ParseError::MixedArray {
                expected, found, ..
            } => format!(
                "array elements must share one kind: expected {}, found {}",
                expected, found
            ),
            ParseError::TooDeep { found, .. } => format!(
                "nesting deeper than {} levels at {}",
                MAX_NESTING_DEPTH, found
            ),
        };

        let location = self.location().unwrap_or_default();
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            location.line, location.column, message
        )?;
        write_snippet(f, self.source_line(), location.column)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Non-fatal diagnostic collected during a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

/// Recursive descent parser for Rill
///
/// A parser can be reused: every call to [`Parser::parse`] starts from a clean
/// cursor and an empty warning list. Source text given to
/// [`Parser::set_source`] is only quoted by the next parse.
#[derive(Debug, Default)]
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) config: ParserConfig,
    pub(crate) warnings: Vec<ParseWarning>,
    depth: usize,
    source_lines: Vec<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Warnings from the most recent parse
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Remember the source text so errors from the next parse can quote the
    /// offending line.
    ///
    /// [`Parser::parse_source`] calls this itself.
    pub fn set_source(&mut self, source: &str) {
        self.source_lines = source.lines().map(str::to_string).collect();
    }

    /// Tokenize and parse `source`
    pub fn parse_source(&mut self, source: &str) -> Result<Program, ParseError> {
        self.set_source(source);
        let tokens = Lexer::new(source).tokenize()?;
        self.parse(tokens)
    }

    /// Parse a token sequence into top-level statements
    pub fn parse(&mut self, tokens: Vec<Token>) -> Result<Program, ParseError> {
        let result = self.begin(tokens).and_then(|()| self.parse_program());
        self.source_lines.clear();
        result
    }

    /// Tokenize and parse `source` as a single expression with no trailing `;`
    pub fn parse_expression_source(&mut self, source: &str) -> Result<AstNode, ParseError> {
        self.set_source(source);
        let result = Lexer::new(source)
            .tokenize()
            .map_err(ParseError::from)
            .and_then(|tokens| self.begin(tokens))
            .and_then(|()| {
                let expr = self.parse_expression()?;
                if !self.is_at_end() {
                    return Err(self.unexpected("end of input"));
                }
                Ok(expr)
            });
        self.source_lines.clear();
        result
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        while !self.is_at_end() {
            program.nodes.push(self.parse_statement()?);
        }
        Ok(program)
    }

    fn begin(&mut self, tokens: Vec<Token>) -> Result<(), ParseError> {
        self.warnings.clear();
        if tokens.len() < 2 {
            return Err(ParseError::EmptyInput);
        }
        self.reset(tokens);
        Ok(())
    }

    fn reset(&mut self, mut tokens: Vec<Token>) {
        if !tokens.last().is_some_and(|t| t.is(TokenKind::Eof)) {
            let location = tokens.last().map(|t| t.location).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, "EOF", location));
        }
        self.tokens = tokens;
        self.position = 0;
        self.depth = 0;
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                found: self.peek().clone(),
                source_line: self.source_line(self.current_location()),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Take the current token. The cursor never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Take the current token if it has the expected kind
    pub(crate) fn consume(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek().clone(),
            source_line: self.source_line(self.current_location()),
        }
    }

    pub(crate) fn source_line(&self, location: SourceLocation) -> String {
        self.source_lines
            .get(location.line.saturating_sub(1))
            .cloned()
            .unwrap_or_default()
    }
}

/// Tokenize and parse `source` with the default configuration
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    Parser::new().parse_source(source)
}

/// Tokenize and parse one bare expression with the default configuration
pub fn parse_expression_source(source: &str) -> Result<AstNode, ParseError> {
    Parser::new().parse_expression_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    #[test]
    fn test_parse_rejects_empty_input() {
        let mut parser = Parser::new();
        assert_eq!(parser.parse(Vec::new()), Err(ParseError::EmptyInput));

        let only_eof = tokenize("   // nothing here").unwrap();
        assert_eq!(only_eof.len(), 1);
        assert_eq!(parser.parse(only_eof), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = Parser::new();
        let first = parser.parse(tokenize("x = 1;").unwrap()).unwrap();
        let second = parser.parse(tokenize("y = 2; z = 3;").unwrap()).unwrap();

        assert_eq!(first.nodes.len(), 1);
        assert_eq!(second.nodes.len(), 2);
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let mut tokens = tokenize("x = 1;").unwrap();
        tokens.pop();
        let program = Parser::new().parse(tokens).unwrap();
        assert_eq!(program.nodes.len(), 1);
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = parse_source("x = 1 $ 2;").unwrap_err();
        assert!(matches!(err, ParseError::Lex(_)));
        assert_eq!(err.location(), Some(SourceLocation::new(1, 7)));
    }

    #[test]
    fn test_error_message_quotes_source_line() {
        let err = parse_source("var x: int = ;").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Syntax error at line 1, column 14"));
        assert!(message.contains("var x: int = ;"));
        assert!(message.ends_with("^"));
    }

    #[test]
    fn test_reused_parser_does_not_quote_stale_source() {
        let mut parser = Parser::new();
        parser.parse_source("var alpha: int = 1;").unwrap();

        let err = parser.parse(tokenize("x +;").unwrap()).unwrap_err();
        assert_eq!(err.location(), Some(SourceLocation::new(1, 4)));
        assert!(!err.to_string().contains("alpha"));
    }

    #[test]
    fn test_source_survives_only_one_parse() {
        let mut parser = Parser::new();
        parser.set_source("y = ;");
        let err = parser.parse(tokenize("y = ;").unwrap()).unwrap_err();
        assert!(err.to_string().contains("y = ;"));

        let err = parser.parse(tokenize("y = ;").unwrap()).unwrap_err();
        assert!(!err.to_string().contains("y = ;"));
    }

    #[test]
    fn test_expression_source_needs_no_semicolon() {
        let node = parse_expression_source("[1, 2, 3]").unwrap();
        assert!(matches!(node, AstNode::ArrayLiteral { ref array, .. } if array.len() == 3));

        let err = parse_expression_source("1 2").unwrap_err();
        match err {
            ParseError::UnexpectedToken { expected, found, .. } => {
                assert_eq!(expected, "end of input");
                assert_eq!(found.text, "2");
            }
            other => panic!("expected trailing-token error, got {:?}", other),
        }
        assert_eq!(parse_expression_source("  "), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_deep_parentheses_are_an_error() {
        let source = format!("x = {}1{};", "(".repeat(5000), ")".repeat(5000));
        let err = parse_source(&source).unwrap_err();
        match &err {
            ParseError::TooDeep { found, .. } => {
                assert_eq!(found.location, SourceLocation::new(1, 5 + MAX_NESTING_DEPTH));
            }
            other => panic!("expected nesting error, got {:?}", other),
        }
        assert!(err.to_string().contains("nesting deeper than"));
    }

    #[test]
    fn test_deep_unary_and_blocks_are_errors() {
        let unary = format!("x = {}1;", "!".repeat(5000));
        assert!(matches!(parse_source(&unary), Err(ParseError::TooDeep { .. })));

        let blocks = format!("{}{}", "{".repeat(5000), "}".repeat(5000));
        assert!(matches!(parse_source(&blocks), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn test_nesting_up_to_the_limit_parses() {
        let depth = MAX_NESTING_DEPTH - 1;
        let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let mut parser = Parser::new();
        assert!(parser.parse_source(&source).is_ok());
        assert!(parser.parse_source(&source).is_ok());
    }

    #[test]
    fn test_cursor_stays_on_eof() {
        let mut parser = Parser::new();
        parser.reset(tokenize("x").unwrap());
        parser.advance();
        parser.advance();
        parser.advance();
        assert!(parser.is_at_end());
        assert_eq!(parser.position, 1);
    }
}
