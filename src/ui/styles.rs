use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Active category tab style
pub fn active_tab_style() -> Style {
    Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::REVERSED)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Category section header style
pub fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Counts and placeholders
pub fn muted_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Warning style (destructive confirmations)
pub fn warning_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Terminal colour for a stored colour token ("blue", "#ff0000", ...)
pub fn token_color(token: &str) -> Option<Color> {
    Color::from_str(token.trim()).ok()
}

/// Style for a category name, using its colour token when enabled
pub fn category_style(token: Option<&str>, use_color: bool) -> Style {
    match token.filter(|_| use_color).and_then(token_color) {
        Some(color) => Style::default().fg(color),
        None => default_style(),
    }
}
