use crate::app::AppState;
use crate::domain::{summary, UiMode};
use crate::persistence::KeyValueStore;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, warning_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the confirmation for removing the filtered category
pub fn render_remove_category_modal<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    if app.ui_mode != UiMode::ConfirmRemoveCategory {
        return;
    }
    let Some(name) = app.store.filter().name() else {
        return;
    };
    let (total, done) = app.store.category_counts(name);

    let modal_area = create_modal_area(area, 9);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("  Remove category "),
            Span::styled(name, modal_title_style()),
            Span::raw("?"),
        ]),
        Line::styled(
            format!("  Its {} will be deleted too.", summary(total, done)),
            warning_style(),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Remove  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Remove Category ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
