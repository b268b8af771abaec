//! Syntax tree pane
//!
//! Shows the printer's dump with light coloring, or the error message when the
//! source did not parse.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Color one dump line: indent, edge label, node name, payload, arrow
pub fn style_ast_line(line: &str) -> Line<'static> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let mut spans = vec![Span::raw(indent.to_string())];

    let (edge, node) = match body.find(": ") {
        Some(idx) if body[..idx].chars().all(|c| c.is_ascii_alphabetic()) => {
            body.split_at(idx + 2)
        }
        _ => ("", body),
    };
    if !edge.is_empty() {
        spans.push(Span::styled(
            edge.to_string(),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let (node, arrow) = match node.strip_suffix(" ->") {
        Some(name) => (name, " ->"),
        None => (node, ""),
    };
    let (name, payload) = match node.find('(') {
        Some(idx) => node.split_at(idx),
        None => (node, ""),
    };

    spans.push(Span::styled(
        name.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ));
    if !payload.is_empty() {
        spans.push(Span::styled(
            payload.to_string(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ));
    }
    if !arrow.is_empty() {
        spans.push(Span::styled(
            arrow.to_string(),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    Line::from(spans)
}

/// Render the AST dump, or `error` in its place
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    error: Option<&str>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if let Some(message) = error {
        let text: Vec<Line> = message
            .lines()
            .map(|l| {
                Line::from(Span::styled(
                    l.to_string(),
                    Style::default().fg(DEFAULT_THEME.error),
                ))
            })
            .collect();
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(lines.len().saturating_sub(visible_height));

    let visible: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "(no statements)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))]
    } else {
        lines
            .iter()
            .skip(*scroll)
            .take(visible_height)
            .map(|l| style_ast_line(l))
            .collect()
    };

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_style_branch_line() {
        let line = style_ast_line("   Value: BinOpNode ->");
        assert_eq!(texts(&line), vec!["   ", "Value: ", "BinOpNode", " ->"]);
    }

    #[test]
    fn test_style_leaf_line() {
        let line = style_ast_line("      Right: StrNode(\"a: b\")");
        assert_eq!(
            texts(&line),
            vec!["      ", "Right: ", "StrNode", "(\"a: b\")"]
        );
    }

    #[test]
    fn test_style_line_without_edge() {
        let line = style_ast_line("IdNode(x)");
        assert_eq!(texts(&line), vec!["", "IdNode", "(x)"]);
    }
}
