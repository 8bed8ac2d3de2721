use crate::app::AppState;
use crate::domain::{summary, CategoryFilter, Row};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    border_style, category_style, default_style, done_style, header_style, muted_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Pane title for the active filter
pub fn pane_title(filter: &CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => " Tasks by category ".to_string(),
        CategoryFilter::Category(name) => format!(" Tasks: {} ", name),
    }
}

/// Render the grouped task sections
pub fn render_task_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let store = &app.store;
    let selected_id = app.selected_task_id();
    let mut items = Vec::new();
    let mut selected_row = None;

    for row in app.rows() {
        let line = match row {
            Row::Header { name, total, done } => {
                if !items.is_empty() {
                    items.push(ListItem::new(Line::raw("")));
                }
                let style = category_style(store.color(&name), app.use_color).patch(header_style());
                Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(format!("  {}", summary(total, done)), muted_style()),
                ])
            }
            Row::Empty => Line::styled("   No tasks in this category.", muted_style()),
            Row::Task(id) => {
                let Some(task) = store.task(&id) else {
                    continue;
                };
                let is_selected = selected_id.as_ref() == Some(&id);
                if is_selected {
                    selected_row = Some(items.len());
                }

                let title_style = if is_selected {
                    selected_style()
                } else if task.done {
                    done_style()
                } else {
                    default_style()
                };
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(task.checkbox(), muted_style()),
                    Span::raw(" "),
                    Span::styled(task.title.clone(), title_style),
                ])
            }
        };
        items.push(ListItem::new(line));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(pane_title(store.filter()), title_style())),
    );

    // ListState keeps the selected task scrolled into view
    let mut state = ListState::default().with_selected(selected_row);
    f.render_stateful_widget(list, area, &mut state);
}
