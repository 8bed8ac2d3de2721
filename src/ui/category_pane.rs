use crate::app::AppState;
use crate::domain::CategoryFilter;
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    active_tab_style, border_style, category_style, default_style, muted_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the category tabs: "All categories" followed by each category and its task count
pub fn render_category_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let store = &app.store;
    let filter = store.filter();
    let mut items = Vec::new();

    let all_style = if filter.is_all() {
        active_tab_style()
    } else {
        default_style()
    };
    items.push(ListItem::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(CategoryFilter::All.label().to_string(), all_style),
        Span::styled(format!("  {}", store.tasks().len()), muted_style()),
    ])));

    for name in store.sorted_categories() {
        let (total, _) = store.category_counts(&name);
        let mut name_style = category_style(store.color(&name), app.use_color);
        if filter.targets(&name) {
            name_style = name_style.patch(active_tab_style());
        }

        items.push(ListItem::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(name, name_style),
            Span::styled(format!("  {}", total), muted_style()),
        ])));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Categories ", title_style())),
    );

    f.render_widget(list, area);
}
