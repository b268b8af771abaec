//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with lexer-driven highlighting and the selected token
//! - [`tokens`]: Token list with location, kind and text
//! - [`ast`]: Syntax tree dump, or the error when parsing failed
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! its area, the data to show, whether it is focused, and its scroll offset.

pub mod ast;
pub mod source;
pub mod status;
pub mod tokens;

pub use ast::render_ast_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
