//! Source code pane rendering with syntax highlighting
//!
//! Highlighting is driven by the token list the lexer produced, so what is
//! colored is exactly what the parser saw. Text between tokens is either
//! whitespace or a `//` comment.
//!
//! # Features
//!
//! - Token-kind coloring from the theme
//! - The selected token is marked and its line highlighted
//! - The view follows the selection unless the pane has focus
//! - Line numbering

use crate::parser::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split text between tokens into plain and comment spans
fn gap_spans(gap: String, spans: &mut Vec<Span<'static>>) {
    if gap.is_empty() {
        return;
    }
    match gap.find("//") {
        Some(idx) => {
            let comment = gap[idx..].to_string();
            let before = gap[..idx].to_string();
            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                comment,
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }
        None => spans.push(Span::raw(gap)),
    }
}

/// Highlight one source line using the tokens that start on it
pub fn highlight_line(
    line: &str,
    line_number: usize,
    tokens: &[Token],
    selected: Option<&Token>,
) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;

    let on_line = tokens
        .iter()
        .filter(|t| t.location.line == line_number && !t.is(TokenKind::Eof));

    for token in on_line {
        let start = token.location.column.saturating_sub(1).min(chars.len());
        if start < cursor {
            continue;
        }
        let width = token.text.chars().take_while(|&c| c != '\n').count();
        let end = (start + width).min(chars.len());

        gap_spans(chars[cursor..start].iter().collect(), &mut spans);

        let mut style = DEFAULT_THEME.token_style(token.kind);
        if selected == Some(token) {
            style = style
                .bg(DEFAULT_THEME.selection_bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            chars[start..end].iter().collect::<String>(),
            style,
        ));
        cursor = end;
    }

    gap_spans(chars[cursor..].iter().collect(), &mut spans);
    Line::from(spans)
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    tokens: &[Token],
    selected: Option<&Token>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    let current_line = selected.map(|t| t.location.line).unwrap_or(0);

    // Keep the selected token on screen while another pane drives the selection
    if !is_focused && current_line > 0 {
        let idx = current_line - 1;
        if idx < *scroll {
            *scroll = idx;
        } else if idx >= *scroll + visible_height {
            *scroll = idx + 1 - visible_height;
        }
    }
    *scroll = (*scroll).min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line, line_num, tokens, selected);
            if is_current {
                let current_bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content.spans {
                    span.style = current_bg.patch(span.style);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
