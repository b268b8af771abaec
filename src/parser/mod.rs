//! Rill source code front end
//!
//! This module transforms Rill source text into an Abstract Syntax Tree (AST):
//! - [`char_stream`]: Character cursor with one character of lookahead
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `statements`,
//!   `declarations` and `expressions`
//! - [`ast`]: AST node definitions
//! - [`printer`]: Indented AST dump
//! - [`config`]: Switchable grammar decisions
//!
//! # Language
//!
//! - Types: `int`, `float`, `char`, `bool`, `string`, `array`, `void`
//!   (return types only)
//! - Statements: `var`/`const` declarations, assignments (`= += -= *= /=`),
//!   `x++;`/`x--;`, `if`, `while`, `func`, blocks, expression statements
//! - Expressions: integer, float and string literals, homogeneous array
//!   literals, unary `- + !`, binary `+ - * / < > <= >= == != && ||`
//! - `//` line comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with a table of left-associative
//! binary operator tiers. No external parser generator dependencies.

pub mod ast;
pub mod char_stream;
pub mod config;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;

pub use ast::{AstNode, Program, SourceLocation};
pub use config::{ArrayPolicy, ParserConfig, Precedence};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parse::{parse_expression_source, parse_source, ParseError, ParseWarning, Parser};
pub use printer::AstPrinter;
