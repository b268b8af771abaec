//! Character stream with a single-character window
//!
//! [`CharStream`] owns the source text and a cursor. The lexer reads it one
//! character at a time through [`CharStream::current`], with one character of
//! lookahead ([`CharStream::peek_next`]) and lookbehind
//! ([`CharStream::peek_previous`]).
//!
//! Past either end of the text the stream yields [`SENTINEL`]. End of input is
//! decided by cursor position, not by the sentinel value, so a literal NUL in
//! the source is still a real character.

use super::ast::SourceLocation;

/// Character returned for positions outside the source text
pub const SENTINEL: char = '\0';

#[derive(Debug, Clone, Default)]
pub struct CharStream {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize, // 0-based column of the current character
}

impl CharStream {
    pub fn new(text: &str) -> Self {
        let mut stream = Self::default();
        stream.reset(text);
        stream
    }

    /// Replace the text and rewind to the first character
    pub fn reset(&mut self, text: &str) {
        self.input = text.chars().collect();
        self.position = 0;
        self.line = 1;
        self.column = 0;
    }

    pub fn current(&self) -> char {
        self.char_at(self.position)
    }

    pub fn peek_next(&self) -> char {
        self.char_at(self.position + 1)
    }

    pub fn peek_previous(&self) -> char {
        match self.position.checked_sub(1) {
            Some(pos) => self.char_at(pos),
            None => SENTINEL,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.input.len()
    }

    /// Move forward one character
    pub fn advance(&mut self) {
        self.advance_by(1);
    }

    /// Move forward `n` characters, stopping at the end of input
    pub fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            if !self.has_next() {
                break;
            }
            if self.input[self.position] == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.has_next() && self.is_space() {
            self.advance();
        }
    }

    /// Skip a `//` comment up to (not including) the newline
    pub fn skip_line_comment(&mut self) {
        if !(self.current_is('/') && self.next_is('/')) {
            return;
        }
        while self.has_next() && self.current() != '\n' {
            self.advance();
        }
    }

    pub fn is_alpha(&self) -> bool {
        self.has_next() && self.current().is_ascii_alphabetic()
    }

    pub fn is_digit(&self) -> bool {
        self.has_next() && self.current().is_ascii_digit()
    }

    pub fn is_space(&self) -> bool {
        self.has_next() && self.current().is_whitespace()
    }

    pub fn current_is(&self, ch: char) -> bool {
        self.has_next() && self.current() == ch
    }

    pub fn next_is(&self, ch: char) -> bool {
        self.position + 1 < self.input.len() && self.peek_next() == ch
    }

    pub fn current_in(&self, set: &[char]) -> bool {
        self.has_next() && set.contains(&self.current())
    }

    /// 1-based location of the current character
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column + 1)
    }

    /// Text of the given 1-based source line, without its newline
    pub fn line_text(&self, line: usize) -> String {
        self.input
            .split(|&c| c == '\n')
            .nth(line.saturating_sub(1))
            .map(|chars| chars.iter().collect())
            .unwrap_or_default()
    }

    fn char_at(&self, pos: usize) -> char {
        self.input.get(pos).copied().unwrap_or(SENTINEL)
    }
}
