//! Inspector application state and logic

use crate::parser::printer::AstPrinter;
use crate::parser::{Lexer, ParseError, Parser, ParserConfig, Token};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp / PageDown
const PAGE_STEP: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right: source -> tokens -> ast)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Ast => FocusedPane::Tokens,
        }
    }
}

/// Everything the front end produced for one source text
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    pub source: String,
    pub tokens: Vec<Token>,
    pub ast_lines: Vec<String>,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl Inspection {
    /// Lex and parse `source`, keeping whatever stage succeeded
    pub fn new(source: &str, config: ParserConfig) -> Self {
        let mut inspection = Inspection {
            source: source.to_string(),
            ..Inspection::default()
        };

        inspection.tokens = match Lexer::new(source).tokenize() {
            Ok(tokens) => tokens,
            Err(err) => {
                inspection.error = Some(err.to_string());
                return inspection;
            }
        };

        let mut parser = Parser::with_config(config);
        parser.set_source(source);
        match parser.parse(inspection.tokens.clone()) {
            Ok(program) => {
                let dump = AstPrinter::new().render_program(&program);
                inspection.ast_lines = dump.lines().map(str::to_string).collect();
            }
            Err(ParseError::EmptyInput) => {}
            Err(err) => inspection.error = Some(err.to_string()),
        }
        inspection.warnings = parser.warnings().iter().map(|w| w.to_string()).collect();

        inspection
    }
}

/// The main application state
pub struct App {
    /// Lexer and parser results being displayed
    pub inspection: Inspection,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `inspection.tokens`
    pub selected_token: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub ast_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(inspection: Inspection) -> Self {
        let status_message = match (&inspection.error, inspection.warnings.first()) {
            (Some(_), _) => String::from("Failed to parse"),
            (None, Some(warning)) => format!("warning: {}", warning),
            (None, None) => String::from("Ready!"),
        };

        App {
            inspection,
            focused_pane: FocusedPane::Tokens,
            selected_token: 0,
            source_scroll: 0,
            tokens_scroll: 0,
            ast_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn selected(&self) -> Option<&Token> {
        self.inspection.tokens.get(self.selected_token)
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
            ])
            .split(main_chunks[0]);

        let selected = self.inspection.tokens.get(self.selected_token);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.inspection.source,
            &self.inspection.tokens,
            selected,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            columns[1],
            &self.inspection.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            columns[2],
            &self.inspection.ast_lines,
            self.inspection.error.as_deref(),
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected_token,
            self.inspection.tokens.len(),
            self.inspection.error.is_some(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_STEP as isize)),
            KeyCode::PageDown => self.move_by(PAGE_STEP as isize),
            KeyCode::Home => self.move_by(isize::MIN),
            KeyCode::End => self.move_by(isize::MAX),
            _ => {}
        }
    }

    /// Move the token selection or scroll the focused pane.
    ///
    /// Scroll offsets are clamped when the pane is drawn.
    fn move_by(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Tokens => {
                let last = self.inspection.tokens.len().saturating_sub(1);
                self.selected_token = offset(self.selected_token, delta).min(last);
                self.update_status();
            }
            FocusedPane::Source => self.source_scroll = offset(self.source_scroll, delta),
            FocusedPane::Ast => self.ast_scroll = offset(self.ast_scroll, delta),
        }
    }

    fn update_status(&mut self) {
        if let Some(token) = self.selected() {
            self.status_message = format!(
                "{} '{}' at {}",
                token.kind.name(),
                token.text,
                token.location
            );
        }
    }
}

fn offset(value: usize, delta: isize) -> usize {
    if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_for(source: &str) -> App {
        App::new(Inspection::new(source, ParserConfig::default()))
    }

    #[test]
    fn test_inspection_collects_every_stage() {
        let inspection = Inspection::new("var x: int = 1;", ParserConfig::default());
        assert_eq!(inspection.tokens.len(), 8);
        assert_eq!(inspection.ast_lines[0], "FullVarDeclNode ->");
        assert!(inspection.error.is_none());
    }

    #[test]
    fn test_inspection_keeps_tokens_on_parse_error() {
        let inspection = Inspection::new("x +;", ParserConfig::default());
        assert_eq!(inspection.tokens.len(), 4);
        assert!(inspection.ast_lines.is_empty());
        assert!(inspection
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Syntax error at line 1, column 4")));
    }

    #[test]
    fn test_inspection_lex_error() {
        let inspection = Inspection::new("x = $;", ParserConfig::default());
        assert!(inspection.tokens.is_empty());
        assert!(inspection
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Lexical error")));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app_for("x;");
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Ast);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Ast);
    }

    #[test]
    fn test_token_selection_is_clamped() {
        let mut app = app_for("x = 1;");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_token, 0);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_token, 1);
        assert_eq!(app.status_message, "EQUAL '=' at 1:3");

        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_token, 4);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected_token, 4);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_token, 0);
    }

    #[test]
    fn test_quit() {
        let mut app = app_for("x;");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_draws_all_panes() {
        let mut app = app_for("var x: int = 1 + 2;");
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Source"));
        assert!(text.contains("Tokens"));
        assert!(text.contains("Syntax Tree"));
        assert!(text.contains("FullVarDeclNode"));
    }
}
