use crate::parser::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub operator: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub selection_bg: Color,
    pub identifier: Color,
    pub type_name: Color, // Cyan for type names
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    operator: Color::Rgb(137, 220, 235),       // Sky for operators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    selection_bg: Color::Rgb(69, 71, 90),
    identifier: Color::Rgb(205, 214, 244),
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal for type names
};

impl Theme {
    /// Foreground style for a token of the given kind
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::VariableType => Style::default().fg(self.type_name),
            k if k.is_keyword() => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::Int | TokenKind::Float => Style::default().fg(self.number),
            TokenKind::String => Style::default().fg(self.string),
            TokenKind::Ident => Style::default().fg(self.identifier),
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket => Style::default().fg(self.primary),
            TokenKind::Semicolon | TokenKind::Colon | TokenKind::Comma | TokenKind::Dot => {
                Style::default().fg(self.fg)
            }
            TokenKind::Eof => Style::default().fg(self.comment),
            _ => Style::default().fg(self.operator),
        }
    }

    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_and_type_styles_differ() {
        let keyword = DEFAULT_THEME.token_style(TokenKind::While);
        let ty = DEFAULT_THEME.token_style(TokenKind::VariableType);
        assert_eq!(keyword.fg, Some(DEFAULT_THEME.keyword));
        assert!(keyword.add_modifier.contains(Modifier::BOLD));
        assert_eq!(ty.fg, Some(DEFAULT_THEME.type_name));
    }

    #[test]
    fn test_operator_style() {
        assert_eq!(
            DEFAULT_THEME.token_style(TokenKind::PlusEq).fg,
            Some(DEFAULT_THEME.operator)
        );
    }
}
