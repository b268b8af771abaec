//! Interactive shell
//!
//! Lines are collected by a [`LineBuffer`] until every `{` has been closed,
//! then the assembled chunk is lexed and parsed in one go. The shell is
//! generic over its input and output streams so it can be driven from tests.

use crate::constants::{CONTINUATION_PROMPT, PROMPT};
use crate::parser::lexer::Lexer;
use crate::parser::printer::{render_tokens, AstPrinter};
use crate::parser::{ParseError, Parser, ParserConfig};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};

/// Accumulates raw lines while a brace-delimited block is still open.
///
/// Braces inside string literals and `//` comments do not count.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    depth: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line; returns the whole chunk once the braces balance
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let (opened, closed) = brace_counts(line);
        self.depth = (self.depth + opened).saturating_sub(closed);
        self.lines.push(line.to_string());

        if self.depth == 0 {
            Some(std::mem::take(&mut self.lines).join("\n"))
        } else {
            None
        }
    }

    /// Whether lines are waiting for a closing brace
    pub fn is_pending(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.depth = 0;
    }
}

/// Count `{` and `}` outside strings and comments
fn brace_counts(line: &str) -> (usize, usize) {
    let mut opened = 0;
    let mut closed = 0;
    let mut in_string = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '/' if chars.peek() == Some(&'/') => break,
            '{' => opened += 1,
            '}' => closed += 1,
            _ => {}
        }
    }

    (opened, closed)
}

const HELP: &str = "\
Enter statements to see their syntax tree. Blocks may span several lines.
  :tokens   toggle the token listing
  :clear    discard an unfinished block
  :help     show this message
  :quit     leave the shell";

pub struct Repl {
    parser: Parser,
    printer: AstPrinter,
    buffer: LineBuffer,
    show_tokens: bool,
    color: bool,
}

impl Repl {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            parser: Parser::with_config(config),
            printer: AstPrinter::new(),
            buffer: LineBuffer::new(),
            show_tokens: false,
            color: false,
        }
    }

    /// Colorize errors and warnings with ANSI escapes
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_tokens(mut self, show_tokens: bool) -> Self {
        self.show_tokens = show_tokens;
        self
    }

    /// Read until end of input or `:quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        let mut lines = input.lines();

        loop {
            let prompt = if self.buffer.is_pending() {
                CONTINUATION_PROMPT
            } else {
                PROMPT
            };
            write!(out, "{}", prompt)?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            if line.trim() == ":clear" {
                self.buffer.clear();
                writeln!(out, "pending input discarded")?;
                continue;
            }

            if !self.buffer.is_pending() {
                match line.trim() {
                    ":quit" | ":q" => break,
                    ":tokens" => {
                        self.show_tokens = !self.show_tokens;
                        let state = if self.show_tokens { "on" } else { "off" };
                        writeln!(out, "token listing {}", state)?;
                        continue;
                    }
                    ":help" => {
                        writeln!(out, "{}", HELP)?;
                        continue;
                    }
                    _ => {}
                }
            }

            if let Some(chunk) = self.buffer.push_line(&line) {
                self.evaluate(&chunk, out)?;
            }
        }

        Ok(())
    }

    /// Lex, parse and print one complete chunk of source
    pub fn evaluate<W: Write>(&mut self, source: &str, out: &mut W) -> io::Result<()> {
        let tokens = match Lexer::new(source).tokenize() {
            Ok(tokens) => tokens,
            Err(err) => return self.report(out, &err.to_string()),
        };

        if self.show_tokens && tokens.len() > 1 {
            write!(out, "{}", render_tokens(&tokens))?;
        }

        self.parser.set_source(source);
        match self.parser.parse(tokens) {
            Ok(program) => {
                write!(out, "{}", self.printer.render_program(&program))?;
                for warning in self.parser.warnings() {
                    let text = format!("warning: {}", warning);
                    if self.color {
                        writeln!(out, "{}", text.yellow())?;
                    } else {
                        writeln!(out, "{}", text)?;
                    }
                }
                Ok(())
            }
            Err(ParseError::EmptyInput) => Ok(()),
            Err(err) => self.report(out, &err.to_string()),
        }
    }

    fn report<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(out, "{}", message.red())
        } else {
            writeln!(out, "{}", message)
        }
    }
}
