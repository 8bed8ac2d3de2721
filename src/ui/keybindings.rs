use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Space done   "),
        Span::raw("x remove   "),
        Span::raw("a add   "),
        Span::raw("n category   "),
        Span::raw("Tab/←/→ filter   "),
        Span::raw("0 all   "),
        Span::raw("D drop category   "),
        Span::raw("C clear done   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
