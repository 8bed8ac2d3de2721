use crate::app::AppState;
use crate::domain::UiMode;
use crate::persistence::KeyValueStore;
use crate::ui::{
    layout::create_modal_area,
    styles::{category_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding tasks/categories
pub fn render_input_form<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, 12);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let is_task = app.ui_mode == UiMode::AddingTask;
        let (title_text, field_label, choice_label) = if is_task {
            (" Add Task ", "Title:", "Category:")
        } else {
            (" New Category ", "Name:", "Colour:")
        };

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        lines.push(Line::raw(field_label));
        lines.push(Line::from(vec![
            Span::raw("> "),
            Span::styled(&form.text, modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::raw(choice_label));

        let choice = if is_task {
            let name = app.form_category().unwrap_or_default();
            let style = category_style(app.store.color(&name), app.use_color);
            Span::styled(name, style)
        } else {
            match app.form_color() {
                Some(token) => Span::styled(format!("■ {}", token), category_style(Some(token), true)),
                None => Span::raw("none"),
            }
        };
        lines.push(Line::from(vec![Span::raw("< "), choice, Span::raw(" >")]));
        lines.push(Line::raw(""));

        lines.push(Line::raw("Tab/Shift+Tab to change  ·  Enter to submit  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
