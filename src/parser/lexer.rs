//! Lexer (tokenizer) for Rill source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The lexer reads through a [`CharStream`] and classifies each lexeme by its
//! first character. Reserved words, single-character symbols and compound
//! operators are looked up in static tables shared by every [`Lexer`].

use super::ast::SourceLocation;
use super::char_stream::CharStream;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Int,
    Float,
    String,

    // Identifiers
    Ident,

    // Keywords
    Var,
    Const,
    If,
    Else,
    While,
    For,
    Func,
    VariableType, // int, float, char, bool, string, array, void

    // Punctuation
    Semicolon, // ;
    Colon,     // :
    Eq,        // =
    Dot,       // .
    Comma,     // ,
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // Single-character operators
    Lt,    // <
    Gt,    // >
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Bang,  // !
    Pipe,  // |
    Amp,   // &

    // Compound operators
    EqEq,       // ==
    NotEq,      // !=
    Le,         // <=
    Ge,         // >=
    AndAnd,     // &&
    OrOr,       // ||
    PlusEq,     // +=
    MinusEq,    // -=
    StarEq,     // *=
    SlashEq,    // /=
    PlusPlus,   // ++
    MinusMinus, // --
    Arrow,      // ->

    // End of input
    Eof,
}

impl TokenKind {
    /// Upper-case name used in token dumps, e.g. `VARIABLE_TYPE`
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Ident => "ID",
            TokenKind::Var => "VAR",
            TokenKind::Const => "CONST",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Func => "FUNC",
            TokenKind::VariableType => "VARIABLE_TYPE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Eq => "EQUAL",
            TokenKind::Dot => "DOT",
            TokenKind::Comma => "COMMA",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::Lt => "LESS",
            TokenKind::Gt => "GREATER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Bang => "NOT",
            TokenKind::Pipe => "PIPE",
            TokenKind::Amp => "AMP",
            TokenKind::EqEq => "EQUAL_EQUAL",
            TokenKind::NotEq => "NOT_EQUAL",
            TokenKind::Le => "LESS_EQUAL",
            TokenKind::Ge => "GREATER_EQUAL",
            TokenKind::AndAnd => "LOGIC_AND",
            TokenKind::OrOr => "LOGIC_OR",
            TokenKind::PlusEq => "PLUS_EQUAL",
            TokenKind::MinusEq => "MINUS_EQUAL",
            TokenKind::StarEq => "MULTIPLY_EQUAL",
            TokenKind::SlashEq => "DIVIDE_EQUAL",
            TokenKind::PlusPlus => "INCREMENT",
            TokenKind::MinusMinus => "DECREMENT",
            TokenKind::Arrow => "ARROW",
            TokenKind::Eof => "EOF",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Var
                | TokenKind::Const
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Func
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::String)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int => write!(f, "integer literal"),
            TokenKind::Float => write!(f, "float literal"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::Var => write!(f, "'var'"),
            TokenKind::Const => write!(f, "'const'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::Func => write!(f, "'func'"),
            TokenKind::VariableType => write!(f, "type name"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::PlusEq => write!(f, "'+='"),
            TokenKind::MinusEq => write!(f, "'-='"),
            TokenKind::StarEq => write!(f, "'*='"),
            TokenKind::SlashEq => write!(f, "'/='"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A lexeme with its kind and the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Ident => write!(f, "identifier '{}'", self.text),
            TokenKind::Int | TokenKind::Float => write!(f, "{} {}", self.kind, self.text),
            TokenKind::String => write!(f, "string literal {}", self.text),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("var", TokenKind::Var);
        map.insert("const", TokenKind::Const);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("for", TokenKind::For);
        map.insert("func", TokenKind::Func);
        for ty in ["int", "float", "char", "bool", "string", "array", "void"] {
            map.insert(ty, TokenKind::VariableType);
        }
        map
    })
}

fn symbols() -> &'static FxHashMap<char, TokenKind> {
    static SYMBOLS: OnceLock<FxHashMap<char, TokenKind>> = OnceLock::new();
    SYMBOLS.get_or_init(|| {
        [
            (';', TokenKind::Semicolon),
            (':', TokenKind::Colon),
            ('=', TokenKind::Eq),
            ('.', TokenKind::Dot),
            (',', TokenKind::Comma),
            ('(', TokenKind::LParen),
            (')', TokenKind::RParen),
            ('{', TokenKind::LBrace),
            ('}', TokenKind::RBrace),
            ('[', TokenKind::LBracket),
            (']', TokenKind::RBracket),
            ('<', TokenKind::Lt),
            ('>', TokenKind::Gt),
            ('+', TokenKind::Plus),
            ('-', TokenKind::Minus),
            ('*', TokenKind::Star),
            ('/', TokenKind::Slash),
            ('!', TokenKind::Bang),
            ('|', TokenKind::Pipe),
            ('&', TokenKind::Amp),
        ]
        .into_iter()
        .collect()
    })
}

/// Characters that may begin a `X=` compound operator
const EQ_COMPOUND_STARTERS: [char; 8] = ['<', '>', '=', '!', '+', '-', '*', '/'];

fn compound_operators() -> &'static FxHashMap<&'static str, TokenKind> {
    static COMPOUND: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    COMPOUND.get_or_init(|| {
        [
            ("<=", TokenKind::Le),
            (">=", TokenKind::Ge),
            ("==", TokenKind::EqEq),
            ("!=", TokenKind::NotEq),
            ("+=", TokenKind::PlusEq),
            ("-=", TokenKind::MinusEq),
            ("*=", TokenKind::StarEq),
            ("/=", TokenKind::SlashEq),
            ("&&", TokenKind::AndAnd),
            ("||", TokenKind::OrOr),
            ("++", TokenKind::PlusPlus),
            ("--", TokenKind::MinusMinus),
            ("->", TokenKind::Arrow),
        ]
        .into_iter()
        .collect()
    })
}

/// Look up a reserved word; `None` means the text is an identifier
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    keywords().get(text).copied()
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
    pub source_line: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )?;
        write_snippet(f, &self.source_line, self.location.column)
    }
}

impl std::error::Error for LexError {}

/// Append the offending source line with a caret under `column`
pub(crate) fn write_snippet(
    f: &mut fmt::Formatter<'_>,
    source_line: &str,
    column: usize,
) -> fmt::Result {
    if source_line.is_empty() {
        return Ok(());
    }
    write!(
        f,
        "\n  {}\n  {}^",
        source_line,
        " ".repeat(column.saturating_sub(1))
    )
}

/// Lexer for Rill source code
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    stream: CharStream,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            stream: CharStream::new(input),
        }
    }

    /// Replace the source and rewind.
    pub fn reset(&mut self, input: &str) {
        self.stream.reset(input);
    }

    /// Join `lines` with newlines, reset, and tokenize the result
    pub fn lex<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<Vec<Token>, LexError> {
        let source = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.reset(&source);
        self.tokenize()
    }

    /// Tokenize the remaining input, `Eof` included
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is(TokenKind::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an `Eof` token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();

        let loc = self.stream.location();
        if !self.stream.has_next() {
            return Ok(Token::new(TokenKind::Eof, "EOF", loc));
        }

        if self.stream.is_alpha() {
            return Ok(self.identifier_or_keyword());
        }

        if self.stream.is_digit()
            || (self.stream.current_is('.') && self.stream.peek_next().is_ascii_digit())
        {
            return Ok(self.number_literal());
        }

        if self.stream.current_is('"') {
            return self.string_literal();
        }

        if let Some(token) = self.symbol() {
            return Ok(token);
        }

        Err(self.error(
            format!("unknown symbol '{}'", self.stream.current().escape_debug()),
            loc,
        ))
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.stream.skip_whitespace();
            if self.stream.current_is('/') && self.stream.next_is('/') {
                self.stream.skip_line_comment();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.stream.location();
        let mut ident = String::new();

        while self.stream.is_alpha() {
            ident.push(self.stream.current());
            self.stream.advance();
        }

        let kind = keyword_kind(&ident).unwrap_or(TokenKind::Ident);
        Token::new(kind, ident, loc)
    }

    /// Parse numeric literal; a single '.' makes it a float
    fn number_literal(&mut self) -> Token {
        let loc = self.stream.location();
        let mut num_str = String::new();
        let mut is_float = false;

        loop {
            if self.stream.is_digit() {
                num_str.push(self.stream.current());
            } else if self.stream.current_is('.') && !is_float {
                is_float = true;
                num_str.push('.');
            } else {
                break;
            }
            self.stream.advance();
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        Token::new(kind, num_str, loc)
    }

    /// Parse string literal; both quotes stay in the token text
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = self.stream.location();
        let mut string = String::from('"');
        self.stream.advance(); // opening quote

        while self.stream.has_next() {
            let ch = self.stream.current();
            string.push(ch);
            self.stream.advance();

            match ch {
                '"' => return Ok(Token::new(TokenKind::String, string, loc)),
                '\\' if self.stream.has_next() => {
                    string.push(self.stream.current());
                    self.stream.advance();
                }
                _ => {}
            }
        }

        Err(self.error("unterminated string literal".to_string(), loc))
    }

    /// Compound operators win over single-character symbols
    fn symbol(&mut self) -> Option<Token> {
        let loc = self.stream.location();
        let first = self.stream.current();

        let may_be_compound = (self.stream.current_in(&EQ_COMPOUND_STARTERS)
            && self.stream.next_is('='))
            || matches!(
                (first, self.stream.peek_next()),
                ('&', '&') | ('|', '|') | ('+', '+') | ('-', '-') | ('-', '>')
            );

        if may_be_compound {
            let text: String = [first, self.stream.peek_next()].iter().collect();
            if let Some(&kind) = compound_operators().get(text.as_str()) {
                self.stream.advance_by(2);
                return Some(Token::new(kind, text, loc));
            }
        }

        let kind = *symbols().get(&first)?;
        self.stream.advance();
        Some(Token::new(kind, first.to_string(), loc))
    }

    fn error(&self, message: String, location: SourceLocation) -> LexError {
        LexError {
            message,
            source_line: self.stream.line_text(location.line),
            location,
        }
    }
}

/// Tokenize a complete source string
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
