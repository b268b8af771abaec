// Constants shared by the printer, shell and inspector

/// Spaces per nesting level in AST dumps
pub const INDENT_WIDTH: usize = 3;

/// Deepest nesting of parentheses, unary prefixes and blocks the parser
/// accepts before failing with `ParseError::TooDeep`
pub const MAX_NESTING_DEPTH: usize = 64;

/// Prompt shown when the shell waits for a new statement
pub const PROMPT: &str = ">> ";

/// Prompt shown while a brace-delimited block is still open
pub const CONTINUATION_PROMPT: &str = ".. ";

/// Source file extension used by the demo and golden test suites
pub const SOURCE_EXTENSION: &str = "rl";
