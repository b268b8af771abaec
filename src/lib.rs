//! # Introduction
//!
//! Rill is the front end of a small statically typed scripting language: a
//! lexer, a recursive descent parser and an AST printer, plus an interactive
//! shell and a terminal inspector built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → CharStream → Lexer → Tokens → Parser → AST → AstPrinter
//! ```
//!
//! 1. [`parser`]: character stream, lexer, parser, AST and printer.
//! 2. [`repl`]: line-buffered interactive shell.
//! 3. [`ui`]: ratatui-based inspector; not part of the stable library API.
//! 4. [`constants`]: shared formatting constants.
//!
//! ## Example
//!
//! ```
//! use rill::parser::{parse_source, AstPrinter};
//!
//! let program = parse_source("var x: int = 1 + 2;").unwrap();
//! let dump = AstPrinter::new().render_program(&program);
//! assert!(dump.starts_with("FullVarDeclNode ->"));
//! ```

pub mod constants;
pub mod parser;
pub mod repl;
pub mod ui;
